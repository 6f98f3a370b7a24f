use std::time::Duration;

use async_trait::async_trait;

use crate::types::Repository;

/// Latency of the stand-in job, matching the dashboard's timer.
pub const DEFAULT_INDEX_DELAY: Duration = Duration::from_millis(3_000);

/// Background work whose completion ends the `Indexing` state.
///
/// Returning `Ok(())` is the completion signal; an error reverts the
/// repository to `NotIndexed` so it can be requested again.
#[async_trait]
pub trait IndexJob: Send + Sync {
    async fn run(&self, repo: Repository) -> anyhow::Result<()>;
}

/// Completes every job after a fixed delay.
#[derive(Clone, Debug)]
pub struct DelayJob {
    delay: Duration,
}

impl DelayJob {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl IndexJob for DelayJob {
    async fn run(&self, repo: Repository) -> anyhow::Result<()> {
        log::debug!("⏳ Simulating indexing of {} for {:?}", repo.full_name, self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
