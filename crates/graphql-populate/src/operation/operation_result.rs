use crate::operation::OperationKey;

/// A completed result for the operation with the same [`OperationKey`].
#[derive(Clone, Debug, PartialEq)]
pub struct OperationResult {
    pub key: OperationKey,
    pub data: Option<serde_json::Value>,
    pub errors: Vec<serde_json::Value>,
}
impl OperationResult {
    pub fn data(key: OperationKey, data: serde_json::Value) -> Self {
        Self {
            key,
            data: Some(data),
            errors: vec![],
        }
    }

    pub fn errors(key: OperationKey, errors: Vec<serde_json::Value>) -> Self {
        Self {
            key,
            data: None,
            errors,
        }
    }

    /// Whether the server produced a response body to learn from. `null`
    /// data counts as no response.
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.is_null())
    }
}
