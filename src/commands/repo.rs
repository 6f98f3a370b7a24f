use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::CommandRunner;
use crate::cli;
use crate::context;
use crate::controller::IndexController;
use crate::types::{IndexStatus, Repository};

#[async_trait]
impl CommandRunner for cli::RepoCmd {
    async fn run(&self, ctx: &context::Context, controller: &IndexController) -> Result<()> {
        match self {
            cli::RepoCmd::List { status } => {
                let repos = filter_by_status(controller.list_repositories(), *status);
                if repos.is_empty() {
                    println!("No repositories found");
                }
                for repo in &repos {
                    println!("{}", format_row(repo));
                }
                Ok(())
            }
            cli::RepoCmd::Status { id } => {
                let status = controller
                    .get_status(*id)
                    .with_context(|| format!("looking up repository {}", id))?;
                println!("{}", status);
                Ok(())
            }
            cli::RepoCmd::Index {
                id,
                no_wait,
                timeout_secs,
            } => {
                controller
                    .request_index(*id)
                    .with_context(|| format!("requesting indexing of repository {}", id))?;
                println!("{} {}", id, IndexStatus::Indexing);

                if *no_wait {
                    log::warn!(
                        "⚠️ Not waiting: the job for repository {} stops when this command exits and its result is not kept",
                        id
                    );
                    return Ok(());
                }

                log::info!(
                    "⏳ Waiting up to {}s (job takes {:?})",
                    timeout_secs,
                    ctx.index_delay
                );
                let settled = controller
                    .wait_until_settled(*id, Duration::from_secs(*timeout_secs))
                    .await?;
                match settled {
                    Some(IndexStatus::Indexed) => {
                        println!("{} {}", id, IndexStatus::Indexed);
                        Ok(())
                    }
                    Some(status) => {
                        let reason = controller.last_error(*id)?;
                        anyhow::bail!(
                            "repository {} failed to index (now {}): {}",
                            id,
                            status,
                            reason.as_deref().unwrap_or("unknown error")
                        )
                    }
                    None => anyhow::bail!(
                        "repository {} did not finish indexing within {}s",
                        id,
                        timeout_secs
                    ),
                }
            }
        }
    }
}

fn filter_by_status(repos: Vec<Repository>, status: Option<IndexStatus>) -> Vec<Repository> {
    match status {
        Some(status) => repos
            .into_iter()
            .filter(|repo| repo.index_status == status)
            .collect(),
        None => repos,
    }
}

fn format_row(repo: &Repository) -> String {
    let mut row = format!(
        "{:>4}  {:<12} {}  ⭐ {}  {}",
        repo.id,
        repo.index_status.label(),
        repo.full_name,
        repo.stars,
        repo.description_or_default()
    );
    if let Some(language) = &repo.language {
        row.push_str(&format!("  {}", language));
    }
    if repo.is_private {
        row.push_str("  (private)");
    }
    row
}
