mod operation;
mod operation_kind;
mod operation_result;
mod populate_exchange;

pub use operation::Operation;
pub use operation::OperationKey;
pub use operation_kind::OperationKind;
pub use operation_result::OperationResult;
pub use populate_exchange::PopulateExchange;
pub use populate_exchange::PopulateStream;

#[cfg(test)]
mod tests;
