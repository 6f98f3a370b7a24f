use clap::Subcommand;

use crate::cli::repo_cmd::RepoCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Repository commands",
        long_about = "Inspect the working set and request indexing without starting the REST API."
    )]
    Repos {
        #[command(subcommand)]
        cmd: RepoCmd,
    },
}
