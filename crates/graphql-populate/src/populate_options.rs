/// Knobs shared by the [`PopulateRewriter`](crate::PopulateRewriter) and the
/// [`PopulateExchange`](crate::operation::PopulateExchange).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulateOptions {
    /// Name of the marker directive (without the leading `@`).
    pub directive_name: String,

    /// Appended to a type name to build generated fragment names
    /// (`Todo` + `Fragment` => `TodoFragment`).
    pub fragment_suffix: String,
}
impl PopulateOptions {
    pub fn with_directive_name(mut self, directive_name: impl Into<String>) -> Self {
        self.directive_name = directive_name.into();
        self
    }

    pub fn with_fragment_suffix(mut self, fragment_suffix: impl Into<String>) -> Self {
        self.fragment_suffix = fragment_suffix.into();
        self
    }
}
impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            directive_name: "populate".to_string(),
            fragment_suffix: "Fragment".to_string(),
        }
    }
}
