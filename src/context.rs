use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::SessionUser;

/// Runtime settings, decoupled from the CLI parser.
#[derive(Clone, Debug)]
pub struct Context {
    pub repos_file: Option<PathBuf>,
    pub index_delay: Duration,
    pub api_listen: SocketAddr,
    pub api_token: String,
    pub user: SessionUser,
    pub log_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            repos_file: cli.repos_file.clone(),
            index_delay: Duration::from_millis(cli.index_delay_ms),
            api_listen: cli.api_listen,
            api_token: cli.api_token.clone(),
            user: SessionUser::new(cli.user_name.clone(), cli.user_email.clone()),
            log_file: cli.log_file.clone(),
        }
    }
}
