mod populate;
mod selections;

use crate::Cli;
use crate::CommandResult;
use populate::PopulateCmd;
use selections::SelectionsCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-populate")]
pub(crate) enum CommandEnum {
    /// Expand `@populate` fields in mutation documents.
    Populate(Box<PopulateCmd>),

    /// Print what was learned from a set of query documents.
    Selections(Box<SelectionsCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Populate(cmd) => cmd.run(cli).await,
            Self::Selections(cmd) => cmd.run(cli).await,
        }
    }
}
