//! Serde model of the standard GraphQL introspection result.
//!
//! Only the parts needed to answer "what does this field return" and "who
//! implements this abstract type" are modelled; everything else in the JSON
//! (descriptions, args, directives, deprecation info) is ignored.

use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Enum,
    InputObject,
    Interface,
    List,
    NonNull,
    Object,
    Scalar,
    Union,
}
impl TypeKind {
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }

    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::List | Self::NonNull)
    }
}

/// `{ "name": "Query" }` as found under `queryType`, `mutationType`, and
/// `subscriptionType`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NamedTypeRef {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub mutation_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub subscription_type: Option<NamedTypeRef>,
    pub types: Vec<IntrospectionType>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    pub interfaces: Option<Vec<IntrospectionTypeRef>>,
    #[serde(default)]
    pub possible_types: Option<Vec<IntrospectionTypeRef>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct IntrospectionField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: IntrospectionTypeRef,
}

/// A (possibly wrapped) reference to a named type, e.g. `[Todo!]!` is
/// `NON_NULL(LIST(NON_NULL(Todo)))`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionTypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<IntrospectionTypeRef>>,
}
impl IntrospectionTypeRef {
    /// Follows `ofType` through LIST and NON_NULL wrappers down to the named
    /// type. Returns `None` when the chain ends without a name.
    pub fn named_type(&self) -> Option<&str> {
        let mut type_ref = self;
        while type_ref.kind.is_wrapper() {
            type_ref = type_ref.of_type.as_deref()?;
        }
        type_ref.name.as_deref()
    }
}

/// Locates the `__schema` object inside the shapes an introspection result is
/// commonly stored in: a full GraphQL response (`{"data": {"__schema": ..}}`),
/// the bare query result (`{"__schema": ..}`), or the schema object itself.
pub(crate) fn find_schema_root(value: serde_json::Value) -> Option<serde_json::Value> {
    let serde_json::Value::Object(mut obj) = value else {
        return None;
    };

    if let Some(data) = obj.remove("data") {
        return find_schema_root(data);
    }

    if let Some(schema) = obj.remove("__schema") {
        return Some(schema);
    }

    if obj.contains_key("types") {
        return Some(serde_json::Value::Object(obj));
    }

    None
}
