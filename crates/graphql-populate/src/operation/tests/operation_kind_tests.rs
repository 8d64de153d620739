use crate::operation::Operation;
use crate::operation::OperationKey;
use crate::operation::OperationKind;
use crate::operation::OperationResult;
use crate::tests::test_utils::parse;
use serde_json::json;

#[test]
fn kind_comes_from_the_first_operation_definition() {
    let kind_of = |src: &str| OperationKind::of_document(&parse(src));

    assert_eq!(kind_of("{ todos { id } }"), OperationKind::Query);
    assert_eq!(kind_of("query Q { todos { id } }"), OperationKind::Query);
    assert_eq!(kind_of("mutation { addTodo { id } }"), OperationKind::Mutation);
    assert_eq!(kind_of("subscription { todoAdded { id } }"), OperationKind::Subscription);
    assert_eq!(
        kind_of("fragment F on Todo { id } mutation M { addTodo { ...F } }"),
        OperationKind::Mutation,
    );
    assert_eq!(kind_of("fragment F on Todo { id }"), OperationKind::Query);
}

#[test]
fn teardown_keeps_the_key() {
    let operation = Operation::from_document(OperationKey(7), parse("{ todos { id } }"));
    let teardown = operation.to_teardown();

    assert_eq!(teardown.key(), OperationKey(7));
    assert_eq!(teardown.kind(), OperationKind::Teardown);
    assert_eq!(teardown.document(), operation.document());
    assert_eq!(OperationKey(7).to_string(), "#7");
}

#[test]
fn null_data_is_not_a_response() {
    assert!(OperationResult::data(OperationKey(1), json!({ "todos": [] })).has_data());
    assert!(!OperationResult::data(OperationKey(1), json!(null)).has_data());
    assert!(!OperationResult::errors(OperationKey(1), vec![json!({ "message": "boom" })]).has_data());
}
