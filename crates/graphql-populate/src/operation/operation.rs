use crate::ast;
use crate::operation::OperationKind;

/// Identity of an operation within the stream. Results and teardowns refer
/// back to the operation they belong to by key.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OperationKey(pub u64);
impl std::fmt::Display for OperationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub(super) key: OperationKey,
    pub(super) kind: OperationKind,
    pub(super) document: ast::operation::Document,
}
impl Operation {
    pub fn new(
        key: OperationKey,
        kind: OperationKind,
        document: ast::operation::Document,
    ) -> Self {
        Self {
            key,
            kind,
            document,
        }
    }

    /// Builds an operation whose kind is taken from the document's first
    /// operation definition.
    pub fn from_document(key: OperationKey, document: ast::operation::Document) -> Self {
        let kind = OperationKind::of_document(&document);
        Self::new(key, kind, document)
    }

    pub fn document(&self) -> &ast::operation::Document {
        &self.document
    }

    pub fn key(&self) -> OperationKey {
        self.key
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The teardown signal for this operation.
    pub fn to_teardown(&self) -> Self {
        Self::new(self.key, OperationKind::Teardown, self.document.clone())
    }

    pub(crate) fn with_document(self, document: ast::operation::Document) -> Self {
        Self {
            document,
            ..self
        }
    }
}
