use crate::operation::OperationKind;
use crate::schema::SchemaIndex;
use crate::schema::SchemaIndexBuildError;
use crate::schema::TypeKind;
use crate::schema::TypeReferenceError;
use crate::tests::test_utils::field;
use crate::tests::test_utils::interface_type;
use crate::tests::test_utils::list;
use crate::tests::test_utils::named;
use crate::tests::test_utils::non_null;
use crate::tests::test_utils::object_type;
use crate::tests::test_utils::scalar_type;
use crate::tests::test_utils::todo_schema;
use crate::tests::test_utils::todo_schema_json;
use serde_json::json;

fn minimal_schema(types: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "mutationType": null,
            "subscriptionType": null,
            "types": types,
        }
    })
}

#[test]
fn field_return_type_unwraps_list_and_non_null() {
    let schema = todo_schema();

    assert_eq!(schema.field_return_type("Mutation", "addTodo"), Some("Todo"));
    assert_eq!(schema.field_return_type("Todo", "creator"), Some("User"));
    assert_eq!(schema.field_return_type("Todo", "id"), Some("ID"));
    assert_eq!(schema.field_return_type("Subscription", "todoAdded"), Some("Todo"));
}

#[test]
fn field_return_type_of_unknown_names_is_none() {
    let schema = todo_schema();

    assert_eq!(schema.field_return_type("Todo", "doesNotExist"), None);
    assert_eq!(schema.field_return_type("DoesNotExist", "id"), None);
}

#[test]
fn typename_is_selectable_on_composite_types_only() {
    let schema = todo_schema();

    assert_eq!(schema.field_return_type("Todo", "__typename"), Some("String"));
    assert_eq!(schema.field_return_type("Node", "__typename"), Some("String"));
    assert_eq!(schema.field_return_type("SearchResult", "__typename"), Some("String"));
    assert_eq!(schema.field_return_type("String", "__typename"), None);
}

#[test]
fn abstract_types_and_implementers() {
    let schema = todo_schema();

    assert!(schema.is_abstract("Node"));
    assert!(schema.is_abstract("SearchResult"));
    assert!(!schema.is_abstract("Todo"));
    assert!(!schema.is_abstract("Unknown"));

    assert_eq!(schema.implementers("Node"), ["User", "Todo", "Tag"]);
    assert_eq!(schema.implementers("SearchResult"), ["User", "Todo"]);
    assert!(schema.implementers("Todo").is_empty());
    assert!(schema.implementers("Unknown").is_empty());
}

#[test]
fn root_types() {
    let schema = todo_schema();

    assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
    assert_eq!(schema.root_type(OperationKind::Mutation), Some("Mutation"));
    assert_eq!(schema.root_type(OperationKind::Subscription), Some("Subscription"));
    assert_eq!(schema.root_type(OperationKind::Teardown), None);
    assert_eq!(schema.type_kind("Mutation"), Some(TypeKind::Object));
}

#[test]
fn accepts_response_and_bare_schema_wrappers() {
    let wrapped = todo_schema_json();
    let bare = wrapped["__schema"].clone();
    let response = json!({ "data": wrapped.clone() });

    let expected = todo_schema();
    assert_eq!(SchemaIndex::from_json_value(bare).unwrap(), expected);
    assert_eq!(SchemaIndex::from_json_value(response).unwrap(), expected);
    assert_eq!(
        SchemaIndex::from_json_str(&wrapped.to_string()).unwrap(),
        expected,
    );
}

#[test]
fn interface_without_possible_types_derives_implementers() {
    let mut node = interface_type("Node", vec![field("id", named("SCALAR", "ID"))], &[]);
    node["possibleTypes"] = serde_json::Value::Null;

    let schema = SchemaIndex::from_json_value(minimal_schema(vec![
        scalar_type("ID"),
        node,
        object_type("A", vec![field("id", named("SCALAR", "ID"))], &["Node"]),
        object_type("B", vec![field("id", named("SCALAR", "ID"))], &[]),
        object_type("Query", vec![field("node", named("INTERFACE", "Node"))], &[]),
    ])).unwrap();

    assert_eq!(schema.implementers("Node"), ["A"]);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = SchemaIndex::from_json_str("{ not json");
    assert!(matches!(result, Err(SchemaIndexBuildError::ParseError(_))));

    let result = SchemaIndex::from_json_value(json!({
        "__schema": { "queryType": { "name": "Query" }, "types": "nope" },
    }));
    assert!(matches!(result, Err(SchemaIndexBuildError::ParseError(_))));
}

#[test]
fn missing_schema_root() {
    let result = SchemaIndex::from_json_value(json!({ "data": { "something": 1 } }));
    assert_eq!(result, Err(SchemaIndexBuildError::MissingSchemaRoot));

    let result = SchemaIndex::from_json_value(json!([1, 2, 3]));
    assert_eq!(result, Err(SchemaIndexBuildError::MissingSchemaRoot));
}

#[test]
fn missing_query_type() {
    let result = SchemaIndex::from_json_value(json!({
        "__schema": {
            "queryType": null,
            "types": [object_type("Query", vec![], &[])],
        }
    }));
    assert_eq!(result, Err(SchemaIndexBuildError::NoQueryOperationTypeDefined));
}

#[test]
fn duplicate_type_definition() {
    let result = SchemaIndex::from_json_value(minimal_schema(vec![
        scalar_type("String"),
        scalar_type("String"),
        object_type("Query", vec![field("a", named("SCALAR", "String"))], &[]),
    ]));
    assert_eq!(result, Err(SchemaIndexBuildError::DuplicateTypeDefinition {
        type_name: "String".to_string(),
    }));
}

#[test]
fn undefined_field_type() {
    let result = SchemaIndex::from_json_value(minimal_schema(vec![
        object_type("Query", vec![field("todo", named("OBJECT", "Todo"))], &[]),
    ]));
    assert_eq!(result, Err(SchemaIndexBuildError::TypeReferenceErrors {
        errors: vec![TypeReferenceError::UndefinedFieldType {
            type_name: "Query".to_string(),
            field_name: "todo".to_string(),
            field_type: "Todo".to_string(),
        }],
    }));
}

#[test]
fn unnamed_type_reference() {
    let result = SchemaIndex::from_json_value(minimal_schema(vec![
        object_type("Query", vec![
            field("broken", json!({ "kind": "NON_NULL", "name": null, "ofType": null })),
        ], &[]),
    ]));
    assert_eq!(result, Err(SchemaIndexBuildError::TypeReferenceErrors {
        errors: vec![TypeReferenceError::UnnamedTypeReference {
            type_name: "Query".to_string(),
            field_name: "broken".to_string(),
        }],
    }));
}

#[test]
fn undefined_possible_type_and_interface() {
    let result = SchemaIndex::from_json_value(minimal_schema(vec![
        scalar_type("ID"),
        interface_type("Node", vec![field("id", non_null(named("SCALAR", "ID")))], &["Ghost"]),
        object_type("Query", vec![field("nodes", list(named("INTERFACE", "Node")))], &["Missing"]),
    ]));

    let Err(SchemaIndexBuildError::TypeReferenceErrors { errors }) = result else {
        panic!("Expected type-reference errors, got: {result:#?}");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&TypeReferenceError::UndefinedPossibleType {
        type_name: "Node".to_string(),
        possible_type: "Ghost".to_string(),
    }));
    assert!(errors.contains(&TypeReferenceError::UndefinedInterface {
        type_name: "Query".to_string(),
        interface_name: "Missing".to_string(),
    }));
}

#[test]
fn root_operation_type_must_be_a_defined_object() {
    let result = SchemaIndex::from_json_value(json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "mutationType": { "name": "Mutation" },
            "types": [
                scalar_type("Mutation"),
                object_type("Query", vec![], &[]),
            ],
        }
    }));
    assert_eq!(result, Err(SchemaIndexBuildError::TypeReferenceErrors {
        errors: vec![TypeReferenceError::InvalidRootOperationType {
            operation: OperationKind::Mutation,
            type_name: "Mutation".to_string(),
        }],
    }));
}

#[test]
fn from_file_reports_unreadable_paths() {
    let result = SchemaIndex::from_file("/definitely/not/a/real/schema.json");
    assert!(matches!(result, Err(SchemaIndexBuildError::SchemaFileReadError(_))));
}

#[test]
fn get_type_exposes_indexed_fields_and_implementers() {
    let schema = todo_schema();

    let todo = schema.get_type("Todo").unwrap();
    assert_eq!(todo.name(), "Todo");
    assert_eq!(todo.kind(), TypeKind::Object);
    assert_eq!(
        todo.fields().iter().map(|(name, ty)| (name.as_str(), ty.as_str())).collect::<Vec<_>>(),
        [("id", "ID"), ("text", "String"), ("creator", "User")],
    );
    assert!(todo.implementers().is_empty());

    assert_eq!(schema.get_type("Node").unwrap().implementers(), ["User", "Todo", "Tag"]);
    assert!(schema.get_type("Missing").is_none());
}
