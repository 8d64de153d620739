//! Learns which fields were selected for each GraphQL type across observed
//! query and subscription documents, and expands mutation fields annotated
//! with `@populate` into full selection sets built from what was learned.
//!
//! The pieces compose as a single-consumer operation stream:
//!
//! * [`schema::SchemaIndex`] answers type questions from an introspected
//!   schema.
//! * [`SelectionExtractor`] turns a completed query into per-type selections.
//! * [`PopulateRewriter`] replaces `@populate` markers with fragment spreads.
//! * [`operation::PopulateExchange`] wires both into a stream transform.

pub mod ast;
pub mod file_reader;
mod fragment_plan;
pub mod operation;
mod populate_options;
mod populate_rewriter;
pub mod schema;
pub mod selection;
mod selection_extractor;

pub use populate_options::PopulateOptions;
pub use populate_rewriter::PopulateRewriter;
pub use selection_extractor::SelectionExtractor;

#[cfg(test)]
mod tests;
