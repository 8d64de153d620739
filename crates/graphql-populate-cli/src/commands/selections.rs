use crate::graphql_files;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use graphql_populate::operation::PopulateExchange;
use graphql_populate::schema::SchemaIndex;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, clap::Args)]
pub(crate) struct SelectionsCmd {
    #[arg(
        default_value="Fragment",
        help="Suffix appended to type names to name the printed fragments.",
        long,
    )]
    fragment_suffix: String,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Path to a JSON file holding the result of an introspection \
             query against the schema.",
        long,
    )]
    schema: PathBuf,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             the query and subscription documents to learn from.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}
impl SelectionsCmd {
    fn learn(&self) -> anyhow::Result<(usize, PopulateExchange)> {
        let schema = SchemaIndex::from_file(&self.schema)?;
        let mut exchange = PopulateExchange::new(Arc::new(schema));

        let files = graphql_files::find_graphql_files(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
        )?;
        log::debug!("Skipped {} non-graphql files.", files.num_skipped);
        for path in &files.paths {
            exchange.learn(&graphql_files::load_document(path)?);
        }

        Ok((files.paths.len(), exchange))
    }
}

#[inherent::inherent]
impl RunnableCommand for SelectionsCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (num_files, exchange) = match self.learn() {
            Ok(learned) => learned,
            Err(e) => return CommandResult::error(e),
        };

        let selections = exchange.selections();
        log::info!(
            "{} Learned selections for {} types from {num_files} files.",
            output_utils::GREEN_CHECK,
            selections.len(),
        );
        if selections.is_empty() {
            return CommandResult::stdout(format_args!("# No selections were observed."));
        }

        CommandResult::stdout(format_args!(
            "{}",
            selections.to_fragment_document(&self.fragment_suffix),
        ))
    }
}
