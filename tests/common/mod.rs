#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use raghub::{IndexJob, IndexStatus, Repository, RepositoryId};
use tokio::sync::Notify;

pub const WAIT: Duration = Duration::from_secs(2);

/// Index job whose completion is fired by the test, per repository.
#[derive(Default)]
pub struct ManualJob {
    signals: Mutex<HashMap<RepositoryId, Arc<Notify>>>,
    failures: Mutex<HashMap<RepositoryId, String>>,
    runs: Mutex<Vec<RepositoryId>>,
}

impl ManualJob {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn signal(&self, id: RepositoryId) -> Arc<Notify> {
        self.signals
            .lock()
            .unwrap()
            .entry(id)
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    pub fn complete(&self, id: RepositoryId) {
        self.signal(id).notify_one();
    }

    pub fn fail(&self, id: RepositoryId, reason: &str) {
        self.failures.lock().unwrap().insert(id, reason.to_string());
        self.signal(id).notify_one();
    }

    pub fn runs(&self) -> Vec<RepositoryId> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexJob for ManualJob {
    async fn run(&self, repo: Repository) -> anyhow::Result<()> {
        self.runs.lock().unwrap().push(repo.id);
        let signal = self.signal(repo.id);
        signal.notified().await;
        match self.failures.lock().unwrap().remove(&repo.id) {
            Some(reason) => anyhow::bail!(reason),
            None => Ok(()),
        }
    }
}

pub fn repo(id: RepositoryId, status: IndexStatus) -> Repository {
    Repository::new(id, &format!("octo/repo-{}", id)).with_status(status)
}
