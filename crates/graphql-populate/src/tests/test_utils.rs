use crate::ast;
use crate::schema::SchemaIndex;
use serde_json::json;
use serde_json::Value;

pub(crate) fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

pub(crate) fn non_null(inner: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

pub(crate) fn list(inner: Value) -> Value {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

pub(crate) fn field(name: &str, type_ref: Value) -> Value {
    json!({
        "name": name,
        "description": null,
        "args": [],
        "type": type_ref,
        "isDeprecated": false,
        "deprecationReason": null,
    })
}

pub(crate) fn scalar_type(name: &str) -> Value {
    json!({
        "kind": "SCALAR",
        "name": name,
        "fields": null,
        "interfaces": null,
        "possibleTypes": null,
    })
}

pub(crate) fn object_type(name: &str, fields: Vec<Value>, interfaces: &[&str]) -> Value {
    json!({
        "kind": "OBJECT",
        "name": name,
        "fields": fields,
        "interfaces": interfaces.iter()
            .map(|iface| named("INTERFACE", iface))
            .collect::<Vec<_>>(),
        "possibleTypes": null,
    })
}

pub(crate) fn interface_type(name: &str, fields: Vec<Value>, possible_types: &[&str]) -> Value {
    json!({
        "kind": "INTERFACE",
        "name": name,
        "fields": fields,
        "interfaces": [],
        "possibleTypes": possible_types.iter()
            .map(|possible| named("OBJECT", possible))
            .collect::<Vec<_>>(),
    })
}

pub(crate) fn union_type(name: &str, possible_types: &[&str]) -> Value {
    json!({
        "kind": "UNION",
        "name": name,
        "fields": null,
        "interfaces": null,
        "possibleTypes": possible_types.iter()
            .map(|possible| named("OBJECT", possible))
            .collect::<Vec<_>>(),
    })
}

/// Introspection result (`{"__schema": ..}`) for:
///
/// ```graphql
/// interface Node { id: ID! }
///
/// type User implements Node {
///   id: ID!
///   name: String!
///   age: Int!
///   todos: [Todo]
/// }
///
/// type Todo implements Node {
///   id: ID!
///   text: String!
///   creator: User!
/// }
///
/// type Tag implements Node { id: ID! label: String! }
///
/// union SearchResult = User | Todo
///
/// type Query {
///   todos: [Todo]
///   users: [User]
///   node: Node
///   nodes: [Node]
///   search: [SearchResult]
/// }
///
/// type Mutation {
///   addTodo: [Todo]
///   removeTodo: [Node]
///   updateUser: User
///   toggleAll: Boolean
///   searchAgain: [SearchResult]
/// }
///
/// type Subscription { todoAdded: Todo! }
/// ```
pub(crate) fn todo_schema_json() -> Value {
    let id_field = || field("id", non_null(named("SCALAR", "ID")));
    json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "mutationType": { "name": "Mutation" },
            "subscriptionType": { "name": "Subscription" },
            "types": [
                scalar_type("ID"),
                scalar_type("String"),
                scalar_type("Int"),
                scalar_type("Boolean"),
                interface_type("Node", vec![id_field()], &["User", "Todo", "Tag"]),
                object_type("User", vec![
                    id_field(),
                    field("name", non_null(named("SCALAR", "String"))),
                    field("age", non_null(named("SCALAR", "Int"))),
                    field("todos", list(named("OBJECT", "Todo"))),
                ], &["Node"]),
                object_type("Todo", vec![
                    id_field(),
                    field("text", non_null(named("SCALAR", "String"))),
                    field("creator", non_null(named("OBJECT", "User"))),
                ], &["Node"]),
                object_type("Tag", vec![
                    id_field(),
                    field("label", non_null(named("SCALAR", "String"))),
                ], &["Node"]),
                union_type("SearchResult", &["User", "Todo"]),
                object_type("Query", vec![
                    field("todos", list(named("OBJECT", "Todo"))),
                    field("users", list(named("OBJECT", "User"))),
                    field("node", named("INTERFACE", "Node")),
                    field("nodes", list(named("INTERFACE", "Node"))),
                    field("search", list(named("UNION", "SearchResult"))),
                ], &[]),
                object_type("Mutation", vec![
                    field("addTodo", list(named("OBJECT", "Todo"))),
                    field("removeTodo", list(named("INTERFACE", "Node"))),
                    field("updateUser", named("OBJECT", "User")),
                    field("toggleAll", named("SCALAR", "Boolean")),
                    field("searchAgain", list(named("UNION", "SearchResult"))),
                ], &[]),
                object_type("Subscription", vec![
                    field("todoAdded", non_null(named("OBJECT", "Todo"))),
                ], &[]),
            ],
            "directives": [],
        }
    })
}

pub(crate) fn todo_schema() -> SchemaIndex {
    SchemaIndex::from_json_value(todo_schema_json()).unwrap()
}

pub(crate) fn parse(src: &str) -> ast::operation::Document {
    ast::operation::parse(src).unwrap()
}

/// Compares documents by their printed form, which ignores source positions.
pub(crate) fn assert_same_document(actual: &ast::operation::Document, expected_src: &str) {
    assert_eq!(actual.to_string(), parse(expected_src).to_string());
}

pub(crate) fn fragment_names(document: &ast::operation::Document) -> Vec<&str> {
    document.definitions.iter()
        .filter_map(|def| match def {
            ast::operation::Definition::Fragment(frag_def) => Some(frag_def.name.as_str()),
            ast::operation::Definition::Operation(_) => None,
        })
        .collect()
}
