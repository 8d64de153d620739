use crate::ast;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,

    /// Signals that the operation with the same key was cancelled or
    /// completed and will produce no further results.
    Teardown,
}
impl OperationKind {
    /// Kind of the first operation definition in `document`. Documents with
    /// no operation definition at all are treated as queries.
    pub fn of_document(document: &ast::operation::Document) -> Self {
        use ast::operation::OperationDefinition;
        document.definitions.iter()
            .find_map(|def| match def {
                ast::operation::Definition::Operation(op_def) => Some(match op_def {
                    OperationDefinition::SelectionSet(_)
                        | OperationDefinition::Query(_) => Self::Query,
                    OperationDefinition::Mutation(_) => Self::Mutation,
                    OperationDefinition::Subscription(_) => Self::Subscription,
                }),
                ast::operation::Definition::Fragment(_) => None,
            })
            .unwrap_or(Self::Query)
    }
}
