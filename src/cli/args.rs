use clap::Parser;
use std::env;
use std::path::PathBuf;

use crate::cli::command::Command;
use crate::controller::DEFAULT_INDEX_DELAY;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Track repository indexing status and serve it over a REST API",
    long_about = "Loads a working set of repositories, drives each through not_indexed -> indexing -> indexed, and exposes the dashboard actions over HTTP.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "repos-file",
        env = "RAGHUB_REPOS_FILE",
        value_name = "PATH",
        help = "JSON file with the repository working set (built-in demo set when omitted)"
    )]
    pub repos_file: Option<PathBuf>,

    #[arg(
        long = "index-delay-ms",
        env = "RAGHUB_INDEX_DELAY_MS",
        default_value_t = DEFAULT_INDEX_DELAY.as_millis() as u64,
        value_name = "MS",
        help = "How long the simulated indexing job takes"
    )]
    pub index_delay_ms: u64,

    #[arg(
        long = "api-listen",
        env = "RAGHUB_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8084",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long = "api-token",
        env = "RAGHUB_API_TOKEN",
        value_name = "TOKEN",
        default_value = "dev",
        help = "Bearer token accepted as a signed-in session"
    )]
    pub api_token: String,

    #[arg(
        long = "user-name",
        env = "RAGHUB_USER_NAME",
        value_name = "NAME",
        help = "Display name of the signed-in user"
    )]
    pub user_name: Option<String>,

    #[arg(
        long = "user-email",
        env = "RAGHUB_USER_EMAIL",
        value_name = "EMAIL",
        help = "Email of the signed-in user"
    )]
    pub user_email: Option<String>,

    #[arg(
        long = "log-file",
        env = "RAGHUB_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    match dotenvy::from_filename(&dotenv_path) {
        Ok(_) => log::debug!("Loaded env from {}", dotenv_path),
        Err(_) => log::debug!("No env file at {}", dotenv_path),
    }
    Cli::parse()
}
