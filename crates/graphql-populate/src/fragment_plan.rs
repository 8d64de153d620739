use crate::ast;
use crate::selection::TypeSelection;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Fragment definitions needed by one rewritten document.
///
/// A request is served by the first fragment authored in the document that
/// is on the same type and selects at least the requested fields. Otherwise
/// requests for the same type and the same selection share one fragment
/// generated here. Generated names are `<Type><suffix>`, then
/// `<Type><suffix>2`, `<Type><suffix>3`, ... when a name is already taken.
#[derive(Debug)]
pub(crate) struct FragmentPlan {
    fragment_suffix: String,
    generated: IndexMap<String, PlannedFragment>,
    reusable: Vec<(String, PlannedFragment)>,
    taken_names: HashSet<String>,
}

#[derive(Debug)]
struct PlannedFragment {
    type_name: String,
    selection: TypeSelection,
}
impl PlannedFragment {
    fn covers(&self, type_name: &str, selection: &TypeSelection) -> bool {
        self.type_name == type_name && self.selection.covers(selection)
    }

    fn matches(&self, type_name: &str, selection: &TypeSelection) -> bool {
        self.type_name == type_name && self.selection == *selection
    }
}

impl FragmentPlan {
    pub(crate) fn new(fragment_suffix: impl Into<String>) -> Self {
        Self {
            fragment_suffix: fragment_suffix.into(),
            generated: IndexMap::new(),
            reusable: vec![],
            taken_names: HashSet::new(),
        }
    }

    /// Reserves the name of a fragment already present in the document.
    pub(crate) fn reserve_name(&mut self, fragment_name: impl Into<String>) {
        self.taken_names.insert(fragment_name.into());
    }

    /// Offers an authored fragment for reuse by requests on the same type that
    /// it already satisfies.
    pub(crate) fn add_reusable(
        &mut self,
        fragment_name: impl Into<String>,
        type_name: impl Into<String>,
        selection: TypeSelection,
    ) {
        let fragment_name = fragment_name.into();
        self.taken_names.insert(fragment_name.clone());
        self.reusable.push((fragment_name, PlannedFragment {
            type_name: type_name.into(),
            selection,
        }));
    }

    /// Name of a fragment on `type_name` that satisfies `selection`.
    pub(crate) fn fragment_for(&mut self, type_name: &str, selection: &TypeSelection) -> String {
        let authored = self.reusable.iter()
            .find(|(_, planned)| planned.covers(type_name, selection))
            .map(|(name, _)| name);
        let reused = authored.or_else(|| {
            self.generated.iter()
                .find(|(_, planned)| planned.matches(type_name, selection))
                .map(|(name, _)| name)
        });
        if let Some(name) = reused.cloned() {
            log::trace!("Reusing fragment `{name}` for `{type_name}`.");
            return name;
        }

        let base_name = format!("{type_name}{}", self.fragment_suffix);
        let mut fragment_name = base_name.clone();
        let mut counter = 2;
        while self.taken_names.contains(&fragment_name) {
            fragment_name = format!("{base_name}{counter}");
            counter += 1;
        }

        self.taken_names.insert(fragment_name.clone());
        self.generated.insert(fragment_name.clone(), PlannedFragment {
            type_name: type_name.to_string(),
            selection: selection.clone(),
        });
        fragment_name
    }

    pub(crate) fn generated_names(&self) -> impl Iterator<Item = &str> {
        self.generated.keys().map(String::as_str)
    }

    pub(crate) fn into_definitions(self) -> impl Iterator<Item = ast::operation::Definition> {
        self.generated.into_iter().map(|(fragment_name, planned)| {
            ast::operation::Definition::Fragment(ast::operation::FragmentDefinition {
                position: ast::AstPos::default(),
                name: fragment_name,
                type_condition: ast::operation::TypeCondition::On(planned.type_name),
                directives: vec![],
                selection_set: planned.selection.to_ast(),
            })
        })
    }
}
