use crate::file_reader;
use crate::file_reader::ReadContentError;
use crate::operation::OperationKind;
use std::path::PathBuf;

fn write_temp_file(file_name: &str, content: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("graphql-populate-file-reader-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn read_document_parses_graphql_files() {
    let path = write_temp_file(
        "mutation.graphql",
        b"mutation AddTodo { addTodo @populate } fragment F on Todo { id }",
    );

    let document = file_reader::read_document(&path).unwrap();
    assert_eq!(document.definitions.len(), 2);
    assert_eq!(OperationKind::of_document(&document), OperationKind::Mutation);
}

#[test]
fn read_document_reports_the_file_that_failed_to_parse() {
    let path = write_temp_file("broken.graphql", b"mutation { addTodo ");

    let err = file_reader::read_document(&path).unwrap_err();
    assert!(matches!(
        &err,
        ReadContentError::DocumentParseError { file_path, .. } if *file_path == path,
    ));
    assert!(err.to_string().contains("broken.graphql"));
}

#[test]
fn read_content_rejects_directories_and_invalid_utf8() {
    let dir = std::env::temp_dir();
    assert_eq!(
        file_reader::read_content(&dir),
        Err(ReadContentError::PathIsNotAFile(dir.clone())),
    );

    let path = write_temp_file("latin1.graphql", &[0x7b, 0xe9, 0x7d]);
    assert!(matches!(
        file_reader::read_content(&path),
        Err(ReadContentError::FileDecodeError { .. }),
    ));
}
