mod introspection;
mod schema_index;

pub use introspection::IntrospectionField;
pub use introspection::IntrospectionSchema;
pub use introspection::IntrospectionType;
pub use introspection::IntrospectionTypeRef;
pub use introspection::NamedTypeRef;
pub use introspection::TypeKind;
pub use schema_index::IndexedType;
pub use schema_index::SchemaIndex;
pub use schema_index::SchemaIndexBuildError;
pub use schema_index::TypeReferenceError;

#[cfg(test)]
mod tests;
