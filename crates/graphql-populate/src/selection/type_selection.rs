use crate::ast;
use crate::selection::FieldSelection;
use indexmap::IndexMap;

/// Everything known to have been selected on one GraphQL type.
///
/// Fields keep first-observation order. Parts that only apply to a narrower
/// type (observed through `... on Other { .. }`) are kept separately under
/// `conditional`, keyed by the narrower type's name.
///
/// Equality is structural and ignores ordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSelection {
    fields: IndexMap<String, FieldSelection>,
    conditional: IndexMap<String, TypeSelection>,
}
impl TypeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conditional(&self) -> &IndexMap<String, TypeSelection> {
        &self.conditional
    }

    pub fn field(&self, field_name: &str) -> Option<&FieldSelection> {
        self.fields.get(field_name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSelection> {
        self.fields.values()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// A copy of this selection without its type-conditioned parts.
    pub fn unconditional_fields(&self) -> TypeSelection {
        TypeSelection {
            fields: self.fields.clone(),
            conditional: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.conditional.is_empty()
    }

    pub fn add_field(&mut self, field: FieldSelection) {
        match self.fields.get_mut(field.name()) {
            Some(existing) => existing.merge(field),
            None => {
                self.fields.insert(field.name().to_string(), field);
            },
        }
    }

    pub fn add_conditional(&mut self, type_name: impl Into<String>, selection: TypeSelection) {
        let type_name = type_name.into();
        match self.conditional.get_mut(&type_name) {
            Some(existing) => existing.merge(selection),
            None => {
                self.conditional.insert(type_name, selection);
            },
        }
    }

    pub fn with_field(mut self, field: FieldSelection) -> Self {
        self.add_field(field);
        self
    }

    /// Unions `other` into `self`. Never removes anything, and merging the
    /// same selection twice is the same as merging it once.
    pub fn merge(&mut self, other: TypeSelection) {
        for (_, field) in other.fields {
            self.add_field(field);
        }
        for (type_name, selection) in other.conditional {
            self.add_conditional(type_name, selection);
        }
    }

    /// True if everything selected in `other` is also selected in `self`.
    pub fn covers(&self, other: &TypeSelection) -> bool {
        let fields_covered = other.fields.values().all(|field| {
            match (self.fields.get(field.name()), field.selection()) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(existing), Some(nested)) => existing.selection()
                    .is_some_and(|existing_nested| existing_nested.covers(nested)),
            }
        });

        fields_covered && other.conditional.iter().all(|(type_name, nested)| {
            self.conditional.get(type_name)
                .is_some_and(|existing| existing.covers(nested))
        })
    }

    pub(crate) fn to_ast(&self) -> ast::operation::SelectionSet {
        let mut items: Vec<ast::operation::Selection> = self.fields.values()
            .map(|field| ast::operation::Selection::Field(field.to_ast()))
            .collect();

        for (type_name, selection) in &self.conditional {
            items.push(ast::operation::Selection::InlineFragment(
                ast::operation::InlineFragment {
                    position: ast::AstPos::default(),
                    type_condition: Some(ast::operation::TypeCondition::On(type_name.clone())),
                    directives: vec![],
                    selection_set: selection.to_ast(),
                },
            ));
        }

        ast::operation::SelectionSet {
            items,
            ..ast::operation::empty_selection_set()
        }
    }
}
