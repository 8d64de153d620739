mod field_selection;
mod selections_by_type;
mod type_selection;

pub use field_selection::FieldSelection;
pub use selections_by_type::SelectionsByType;
pub use type_selection::TypeSelection;
