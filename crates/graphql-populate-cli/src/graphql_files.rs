use anyhow::Context;
use graphql_populate::ast;
use graphql_populate::file_reader;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// GraphQL files found at or under a set of input paths.
#[derive(Debug, Default)]
pub(crate) struct GraphQLFiles {
    pub num_skipped: usize,
    pub paths: Vec<PathBuf>,
}

/// Recursively collects every file at or under `file_or_dir_paths` whose
/// extension is one of `graphql_file_exts`.
pub(crate) fn find_graphql_files(
    file_or_dir_paths: &[PathBuf],
    graphql_file_exts: &[String],
) -> anyhow::Result<GraphQLFiles> {
    // Normalize to bare extensions, the form `Path::extension()` returns.
    let graphql_file_exts: HashSet<&str> =
        graphql_file_exts.iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

    log::debug!("Scanning {} input paths...", file_or_dir_paths.len());
    let mut found = GraphQLFiles::default();
    for path in file_or_dir_paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            let entry = entry.with_context(|| format!(
                "Failed to scan filesystem entries at/under {path:?}",
            ))?;
            let entry_path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {entry_path:?}.");
                continue;
            }

            let has_graphql_ext = entry_path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| graphql_file_exts.contains(ext));
            if has_graphql_ext {
                log::trace!("Found GraphQL file at {entry_path:?}.");
                found.paths.push(canonicalize(entry_path)?);
            } else {
                found.num_skipped += 1;
            }
        }
    }

    // A single explicitly named file is loaded even when its extension isn't
    // one of `graphql_file_exts`.
    if found.paths.is_empty()
        && let [only_path] = file_or_dir_paths
        && only_path.is_file() {
        let only_path = canonicalize(only_path)?;
        log::warn!(
            "Proceeding with {only_path:?} even though it doesn't match any of \
            the --graphql-file-exts ({}).",
            graphql_file_exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        found.num_skipped = found.num_skipped.saturating_sub(1);
        found.paths.push(only_path);
    }

    log::debug!("Found {} GraphQL files.", found.paths.len());
    Ok(found)
}

/// Reads and parses one executable GraphQL document.
pub(crate) fn load_document(path: &Path) -> anyhow::Result<ast::operation::Document> {
    let document = file_reader::read_document(path)?;
    log::trace!("Loaded {} definitions from {path:?}.", document.definitions.len());
    Ok(document)
}

fn canonicalize(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve path {path:?}"))
}
