use crate::ast;
use crate::selection::TypeSelection;

/// A field recorded as selected on some type, along with what was selected
/// beneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSelection {
    pub(super) name: String,
    pub(super) arguments: Vec<(String, ast::Value)>,
    pub(super) selection: Option<TypeSelection>,
}
impl FieldSelection {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: vec![],
            selection: None,
        }
    }

    pub fn nested(name: impl Into<String>, selection: TypeSelection) -> Self {
        Self {
            name: name.into(),
            arguments: vec![],
            selection: Some(selection),
        }
    }

    /// Attaches arguments unless any of them references a variable. Variables
    /// belong to the document they were observed in and would dangle anywhere
    /// else.
    pub fn with_arguments(mut self, arguments: Vec<(String, ast::Value)>) -> Self {
        if arguments.iter().all(|(_, value)| !references_variable(value)) {
            self.arguments = arguments;
        }
        self
    }

    pub fn arguments(&self) -> &[(String, ast::Value)] {
        self.arguments.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn selection(&self) -> Option<&TypeSelection> {
        self.selection.as_ref()
    }

    /// Additive merge: nested selections are unioned recursively and the newer
    /// observation's arguments win when it has any.
    pub fn merge(&mut self, other: FieldSelection) {
        if !other.arguments.is_empty() {
            self.arguments = other.arguments;
        }

        let Some(observed) = other.selection else {
            return;
        };
        match &mut self.selection {
            Some(existing) => existing.merge(observed),
            None => self.selection = Some(observed),
        }
    }

    pub(crate) fn to_ast(&self) -> ast::operation::Field {
        let selection_set = match &self.selection {
            Some(selection) => selection.to_ast(),
            None => ast::operation::empty_selection_set(),
        };

        ast::operation::Field {
            position: ast::AstPos::default(),
            alias: None,
            name: self.name.clone(),
            arguments: self.arguments.clone(),
            directives: vec![],
            selection_set,
        }
    }
}

fn references_variable(value: &ast::Value) -> bool {
    match value {
        ast::Value::Variable(_) => true,
        ast::Value::List(items) => items.iter().any(references_variable),
        ast::Value::Object(fields) => fields.values().any(references_variable),
        ast::Value::Boolean(_)
            | ast::Value::Enum(_)
            | ast::Value::Float(_)
            | ast::Value::Int(_)
            | ast::Value::Null
            | ast::Value::String(_) => false,
    }
}
