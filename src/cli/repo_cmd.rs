use clap::Subcommand;

use crate::types::IndexStatus;

#[derive(Subcommand, Debug, Clone)]
pub enum RepoCmd {
    #[command(
        about = "List repositories",
        long_about = "Print the working set in source order with each repository's indexing status."
    )]
    List {
        #[arg(
            long,
            value_name = "STATUS",
            help = "Only show repositories in STATUS (not_indexed, indexing, indexed)"
        )]
        status: Option<IndexStatus>,
    },
    #[command(
        about = "Show a repository's status",
        long_about = "Print the indexing status of one repository. Fails for unknown ids."
    )]
    Status {
        #[arg(long, value_name = "ID", help = "Repository id")]
        id: u64,
    },
    #[command(
        about = "Request indexing",
        long_about = "Move a not-indexed repository to indexing and wait for the job to settle. Nothing is persisted, so a job still running when the command exits is lost."
    )]
    Index {
        #[arg(long, value_name = "ID", help = "Repository id")]
        id: u64,
        #[arg(
            long = "no-wait",
            default_value_t = false,
            help = "Exit right after the request; the job is dropped with the process"
        )]
        no_wait: bool,
        #[arg(
            long = "timeout-secs",
            default_value_t = 30u64,
            value_name = "SECS",
            help = "Give up waiting after SECS seconds"
        )]
        timeout_secs: u64,
    },
}
