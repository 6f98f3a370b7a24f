use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::{AuthProvider, StaticTokenAuth};
use crate::context;
use crate::controller::{DelayJob, IndexController};
use crate::source::{FileSource, FixtureSource, RepositorySource};
use crate::types::Repository;

pub fn load_repositories(ctx: &context::Context) -> Result<Vec<Repository>> {
    match &ctx.repos_file {
        Some(path) => {
            let source = FileSource::new(path);
            log::info!("📂 Repositories file: {}", source.path().display());
            source.load()
        }
        None => {
            log::info!("📂 No repositories file, using the demo working set");
            FixtureSource.load()
        }
    }
}

pub fn build_controller(ctx: &context::Context, repos: Vec<Repository>) -> Result<IndexController> {
    let job = Arc::new(DelayJob::new(ctx.index_delay));
    IndexController::new(repos, job).context("building working set")
}

pub fn build_auth(ctx: &context::Context) -> Arc<dyn AuthProvider> {
    if ctx.api_token.is_empty() {
        log::warn!("🔐 Empty API token: every dashboard request will be rejected");
    }
    Arc::new(StaticTokenAuth::new(ctx.api_token.clone(), ctx.user.clone()))
}
