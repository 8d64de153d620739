use crate::graphql_files;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use graphql_populate::operation::Operation;
use graphql_populate::operation::OperationKey;
use graphql_populate::operation::OperationKind;
use graphql_populate::operation::PopulateExchange;
use graphql_populate::schema::SchemaIndex;
use graphql_populate::PopulateOptions;
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, clap::Args)]
pub(crate) struct PopulateCmd {
    #[arg(
        default_value="populate",
        help="Name of the directive (without `@`) that marks fields to \
             populate.",
        long,
    )]
    directive: String,

    #[arg(
        default_value="Fragment",
        help="Suffix appended to type names to name generated fragments.",
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
        help="GraphQL files, or directories containing GraphQL files, with \
             the query and subscription documents to learn selections from.",
        long,
        num_args=1..,
    )]
    observe: Vec<PathBuf>,

    #[arg(
        help="Path to a JSON file holding the result of an introspection \
             query against the schema.",
        long,
    )]
    schema: PathBuf,

    #[arg(
        help="GraphQL files holding the mutation documents to populate.",
        name="MUTATION_FILES",
        required=true,
    )]
    mutation_files: Vec<PathBuf>,
}
impl PopulateCmd {
    fn populate(&self) -> anyhow::Result<String> {
        let schema = SchemaIndex::from_file(&self.schema)?;
        let options = PopulateOptions::default()
            .with_directive_name(self.directive.as_str())
            .with_fragment_suffix(self.fragment_suffix.as_str());
        let mut exchange = PopulateExchange::new(Arc::new(schema))
            .with_options(options);

        if !self.observe.is_empty() {
            let observed = graphql_files::find_graphql_files(
                &self.observe,
                &self.graphql_file_exts,
            )?;
            for path in &observed.paths {
                exchange.learn(&graphql_files::load_document(path)?);
            }
            log::debug!(
                "Learned selections for {} types from {} files.",
                exchange.selections().len(),
                observed.paths.len(),
            );
        }

        let mut operations = Vec::with_capacity(self.mutation_files.len());
        for (idx, path) in self.mutation_files.iter().enumerate() {
            let operation = Operation::from_document(
                OperationKey(idx as u64),
                graphql_files::load_document(path)?,
            );
            if operation.kind() != OperationKind::Mutation {
                log::warn!("{path:?} holds no mutation; printing it unchanged.");
            }
            operations.push(operation);
        }

        let mut output = String::new();
        for operation in exchange.transform(operations) {
            let path = &self.mutation_files[operation.key().0 as usize];
            writeln!(output, "# {}\n{}", path.display(), operation.document())?;
        }
        log::info!(
            "{} Populated {} documents.",
            output_utils::GREEN_CHECK,
            self.mutation_files.len(),
        );

        Ok(output.trim_end().to_string())
    }
}

#[inherent::inherent]
impl RunnableCommand for PopulateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.populate() {
            Ok(output) => CommandResult::stdout(format_args!("{output}")),
            Err(e) => CommandResult::error(e),
        }
    }
}
