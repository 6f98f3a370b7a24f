use async_trait::async_trait;

use crate::cli::Command;
use crate::context;
use crate::controller::IndexController;

pub mod repo;

#[async_trait]
pub trait CommandRunner {
    async fn run(&self, ctx: &context::Context, controller: &IndexController)
        -> anyhow::Result<()>;
}

impl Command {
    pub async fn run(
        &self,
        ctx: &context::Context,
        controller: &IndexController,
    ) -> anyhow::Result<()> {
        match self {
            Command::Repos { cmd } => cmd.run(ctx, controller).await,
        }
    }
}
