use crate::file_reader;
use crate::operation::OperationKind;
use crate::schema::introspection;
use crate::schema::IntrospectionSchema;
use crate::schema::IntrospectionTypeRef;
use crate::schema::TypeKind;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaIndexBuildError>;

const TYPENAME_FIELD: &str = "__typename";
const TYPENAME_FIELD_TYPE: &str = "String";

/// One named type from the introspected schema, reduced to what the
/// extractor and rewriter need.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedType {
    pub(super) name: String,
    pub(super) kind: TypeKind,
    /// Field name => named return type (list/non-null wrappers stripped).
    pub(super) fields: IndexMap<String, String>,
    pub(super) implementers: Vec<String>,
}
impl IndexedType {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    /// Object types that may be returned where this type is expected. Always
    /// empty for non-abstract types.
    pub fn implementers(&self) -> &[String] {
        self.implementers.as_slice()
    }
}

/// Read-only index over an introspected schema.
///
/// Built once and never mutated afterwards, so it is usually shared behind an
/// `Arc` by everything that processes operations.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaIndex {
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    types: HashMap<String, IndexedType>,
}
impl SchemaIndex {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let content = file_reader::read_content(file_path.as_ref())
            .map_err(|err| SchemaIndexBuildError::SchemaFileReadError(Box::new(err)))?;
        Self::from_json_str(content.as_str())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|err| SchemaIndexBuildError::ParseError(err.to_string()))?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let schema_value = introspection::find_schema_root(value)
            .ok_or(SchemaIndexBuildError::MissingSchemaRoot)?;
        let schema: IntrospectionSchema = serde_json::from_value(schema_value)
            .map_err(|err| SchemaIndexBuildError::ParseError(err.to_string()))?;
        Self::from_introspection(schema)
    }

    pub fn from_introspection(schema: IntrospectionSchema) -> Result<Self> {
        let mut types: HashMap<String, IndexedType> = HashMap::with_capacity(schema.types.len());
        let mut declared_interfaces: Vec<(String, Vec<IntrospectionTypeRef>)> = vec![];
        let mut declared_possible_types: Vec<(String, Option<Vec<IntrospectionTypeRef>>)> = vec![];
        let mut errors = vec![];

        for introspected in schema.types {
            if types.contains_key(&introspected.name) {
                return Err(SchemaIndexBuildError::DuplicateTypeDefinition {
                    type_name: introspected.name,
                });
            }

            let mut fields = IndexMap::new();
            for field in introspected.fields.unwrap_or_default() {
                match field.field_type.named_type() {
                    Some(return_type) => {
                        fields.insert(field.name, return_type.to_string());
                    },
                    None => errors.push(TypeReferenceError::UnnamedTypeReference {
                        type_name: introspected.name.clone(),
                        field_name: field.name,
                    }),
                }
            }

            if introspected.kind == TypeKind::Object
                && let Some(interfaces) = introspected.interfaces {
                declared_interfaces.push((introspected.name.clone(), interfaces));
            }
            if introspected.kind.is_abstract() {
                declared_possible_types.push((
                    introspected.name.clone(),
                    introspected.possible_types,
                ));
            }

            types.insert(introspected.name.clone(), IndexedType {
                name: introspected.name,
                kind: introspected.kind,
                fields,
                implementers: vec![],
            });
        }

        for indexed in types.values() {
            for (field_name, return_type) in &indexed.fields {
                if !types.contains_key(return_type) {
                    errors.push(TypeReferenceError::UndefinedFieldType {
                        type_name: indexed.name.clone(),
                        field_name: field_name.clone(),
                        field_type: return_type.clone(),
                    });
                }
            }
        }

        // `possibleTypes` is authoritative when present. Interfaces that omit
        // it fall back to the `interfaces` lists declared on object types.
        for (abstract_name, possible_types) in declared_possible_types {
            let implementers: Vec<String> = match possible_types {
                Some(possible_types) => possible_types.iter()
                    .filter_map(|type_ref| match type_ref.named_type() {
                        Some(name) if types.contains_key(name) => Some(name.to_string()),
                        Some(name) => {
                            errors.push(TypeReferenceError::UndefinedPossibleType {
                                type_name: abstract_name.clone(),
                                possible_type: name.to_string(),
                            });
                            None
                        },
                        None => None,
                    })
                    .collect(),

                None => declared_interfaces.iter()
                    .filter(|(_, interfaces)| interfaces.iter().any(|iface| {
                        iface.named_type() == Some(abstract_name.as_str())
                    }))
                    .map(|(object_name, _)| object_name.clone())
                    .collect(),
            };

            if let Some(indexed) = types.get_mut(&abstract_name) {
                indexed.implementers = implementers;
            }
        }

        for (object_name, interfaces) in &declared_interfaces {
            for iface in interfaces {
                if let Some(iface_name) = iface.named_type()
                    && !types.contains_key(iface_name) {
                    errors.push(TypeReferenceError::UndefinedInterface {
                        type_name: object_name.clone(),
                        interface_name: iface_name.to_string(),
                    });
                }
            }
        }

        let query_type = match schema.query_type {
            Some(named_ref) => named_ref.name,
            None => return Err(SchemaIndexBuildError::NoQueryOperationTypeDefined),
        };
        let mutation_type = schema.mutation_type.map(|named_ref| named_ref.name);
        let subscription_type = schema.subscription_type.map(|named_ref| named_ref.name);

        let root_types = [
            (OperationKind::Query, Some(&query_type)),
            (OperationKind::Mutation, mutation_type.as_ref()),
            (OperationKind::Subscription, subscription_type.as_ref()),
        ];
        for (operation, type_name) in root_types {
            let Some(type_name) = type_name else { continue };
            match types.get(type_name) {
                Some(indexed) if indexed.kind == TypeKind::Object => (),
                _ => errors.push(TypeReferenceError::InvalidRootOperationType {
                    operation,
                    type_name: type_name.clone(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(SchemaIndexBuildError::TypeReferenceErrors { errors });
        }

        Ok(Self {
            query_type,
            mutation_type,
            subscription_type,
            types,
        })
    }

    /// Named return type of `type_name.field_name`, or `None` if either name
    /// is unknown to the schema.
    pub fn field_return_type(&self, type_name: &str, field_name: &str) -> Option<&str> {
        let indexed = self.get_type(type_name)?;
        if let Some(return_type) = indexed.fields.get(field_name) {
            return Some(return_type.as_str());
        }

        // `__typename` is implicitly selectable on every composite type.
        if field_name == TYPENAME_FIELD
            && matches!(indexed.kind, TypeKind::Object | TypeKind::Interface | TypeKind::Union) {
            return Some(TYPENAME_FIELD_TYPE);
        }

        None
    }

    pub fn get_type(&self, type_name: &str) -> Option<&IndexedType> {
        self.types.get(type_name)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Interfaces and unions are abstract. Unknown names are not.
    pub fn is_abstract(&self, type_name: &str) -> bool {
        self.get_type(type_name)
            .is_some_and(|indexed| indexed.kind.is_abstract())
    }

    pub fn implementers(&self, type_name: &str) -> &[String] {
        self.get_type(type_name)
            .map(|indexed| indexed.implementers())
            .unwrap_or(&[])
    }

    pub fn query_type(&self) -> &str {
        self.query_type.as_str()
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// Root object type an operation of the given kind starts from.
    /// [`OperationKind::Teardown`] has none.
    pub fn root_type(&self, operation: OperationKind) -> Option<&str> {
        match operation {
            OperationKind::Query => Some(self.query_type()),
            OperationKind::Mutation => self.mutation_type(),
            OperationKind::Subscription => self.subscription_type(),
            OperationKind::Teardown => None,
        }
    }

    pub fn type_kind(&self, type_name: &str) -> Option<TypeKind> {
        self.get_type(type_name).map(IndexedType::kind)
    }

    pub fn types(&self) -> &HashMap<String, IndexedType> {
        &self.types
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaIndexBuildError {
    #[error("Multiple introspected types share the name `{type_name}`")]
    DuplicateTypeDefinition {
        type_name: String,
    },

    #[error("No `__schema` object was found in the introspection input")]
    MissingSchemaRoot,

    #[error("The introspected schema does not declare a `queryType`")]
    NoQueryOperationTypeDefined,

    #[error("Introspection input does not have the expected shape: {0}")]
    ParseError(String),

    #[error("Failure while trying to read an introspection file from disk")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error(
        "Encountered the following type-reference errors while indexing the \
        schema:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    TypeReferenceErrors {
        errors: Vec<TypeReferenceError>,
    },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeReferenceError {
    #[error(
        "The {operation:?} root operation type `{type_name}` is not an object \
        type defined in the schema"
    )]
    InvalidRootOperationType {
        operation: OperationKind,
        type_name: String,
    },

    #[error("`{type_name}.{field_name}` returns undefined type `{field_type}`")]
    UndefinedFieldType {
        type_name: String,
        field_name: String,
        field_type: String,
    },

    #[error("`{type_name}` implements undefined interface `{interface_name}`")]
    UndefinedInterface {
        type_name: String,
        interface_name: String,
    },

    #[error("`{type_name}` lists undefined possible type `{possible_type}`")]
    UndefinedPossibleType {
        type_name: String,
        possible_type: String,
    },

    #[error("The return type of `{type_name}.{field_name}` has no named type")]
    UnnamedTypeReference {
        type_name: String,
        field_name: String,
    },
}
