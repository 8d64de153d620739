use crate::ast;
use crate::selection::TypeSelection;
use indexmap::IndexMap;

/// The accumulated selection for each type name.
///
/// Entries only ever grow: [`merge`](Self::merge) unions new observations
/// into what is already recorded and nothing is evicted. The store has no
/// interior mutability; whoever owns it is its single writer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionsByType {
    selections: IndexMap<String, TypeSelection>,
}
impl SelectionsByType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeSelection> {
        self.selections.get(type_name)
    }

    /// Like [`get`](Self::get), but treats a recorded-but-empty selection as
    /// absent.
    pub fn get_non_empty(&self, type_name: &str) -> Option<&TypeSelection> {
        self.get(type_name).filter(|selection| !selection.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeSelection)> {
        self.selections.iter()
            .map(|(type_name, selection)| (type_name.as_str(), selection))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn merge(&mut self, type_name: impl Into<String>, selection: TypeSelection) {
        let type_name = type_name.into();
        match self.selections.get_mut(&type_name) {
            Some(existing) => existing.merge(selection),
            None => {
                self.selections.insert(type_name, selection);
            },
        }
    }

    pub fn merge_all(&mut self, other: SelectionsByType) {
        for (type_name, selection) in other.selections {
            self.merge(type_name, selection);
        }
    }

    /// Prints the store as one fragment definition per type with a non-empty
    /// selection, named `<Type><fragment_suffix>`.
    pub fn to_fragment_document(&self, fragment_suffix: &str) -> ast::operation::Document {
        let definitions = self.iter()
            .filter(|(_, selection)| !selection.is_empty())
            .map(|(type_name, selection)| {
                ast::operation::Definition::Fragment(ast::operation::FragmentDefinition {
                    position: ast::AstPos::default(),
                    name: format!("{type_name}{fragment_suffix}"),
                    type_condition: ast::operation::TypeCondition::On(type_name.to_string()),
                    directives: vec![],
                    selection_set: selection.to_ast(),
                })
            })
            .collect();

        ast::operation::Document { definitions }
    }
}
