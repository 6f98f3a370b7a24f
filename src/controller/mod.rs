mod events;
pub mod job;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::types::{IndexStatus, IndexerError, Repository, RepositoryId};

pub use events::{StatusChange, StatusSummary};
pub use job::{DelayJob, IndexJob, DEFAULT_INDEX_DELAY};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct RepositoryRecord {
    repository: Repository,
    last_error: Option<String>,
    changed_at: SystemTime,
    /// Bumped whenever a job is scheduled; only the latest job may finish.
    attempt: u64,
    job_pending: bool,
}

impl RepositoryRecord {
    fn new(repository: Repository) -> Self {
        Self {
            repository,
            last_error: None,
            changed_at: SystemTime::now(),
            attempt: 0,
            job_pending: false,
        }
    }

    fn status(&self) -> IndexStatus {
        self.repository.index_status
    }

    fn set_status(&mut self, status: IndexStatus) {
        self.repository.index_status = status;
        self.changed_at = SystemTime::now();
    }

    fn start_job(&mut self) -> u64 {
        self.attempt += 1;
        self.job_pending = true;
        self.attempt
    }
}

/// Records keyed by id, plus the order the source delivered them in.
#[derive(Debug, Default)]
struct WorkingSet {
    order: Vec<RepositoryId>,
    records: HashMap<RepositoryId, RepositoryRecord>,
}

impl WorkingSet {
    fn from_repositories(repositories: Vec<Repository>) -> Result<Self, IndexerError> {
        let mut set = WorkingSet::default();
        for repo in repositories {
            let id = repo.id;
            if set.records.insert(id, RepositoryRecord::new(repo)).is_some() {
                return Err(IndexerError::DuplicateRepository(id));
            }
            set.order.push(id);
        }
        Ok(set)
    }

    fn get(&self, id: RepositoryId) -> Result<&RepositoryRecord, IndexerError> {
        self.records
            .get(&id)
            .ok_or(IndexerError::UnknownRepository(id))
    }

    fn get_mut(&mut self, id: RepositoryId) -> Result<&mut RepositoryRecord, IndexerError> {
        self.records
            .get_mut(&id)
            .ok_or(IndexerError::UnknownRepository(id))
    }

    fn iter(&self) -> impl Iterator<Item = &RepositoryRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

struct Inner {
    state: RwLock<WorkingSet>,
    job: Arc<dyn IndexJob>,
    events: broadcast::Sender<StatusChange>,
    shutdown: CancellationToken,
}

impl Inner {
    fn read(&self) -> RwLockReadGuard<'_, WorkingSet> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WorkingSet> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, change: StatusChange) {
        // No subscribers is fine.
        let _ = self.events.send(change);
    }

    /// Applies the job outcome, provided the job is still the current one.
    fn finish(&self, id: RepositoryId, attempt: u64, outcome: anyhow::Result<()>) {
        let change = {
            let mut set = self.write();
            let record = match set.get_mut(id) {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("Dropping job result: {}", err);
                    return;
                }
            };
            if record.attempt != attempt || record.status() != IndexStatus::Indexing {
                log::warn!(
                    "Dropping stale job result for {} (attempt {}, status {})",
                    record.repository.full_name,
                    attempt,
                    record.status()
                );
                return;
            }
            record.job_pending = false;

            match outcome {
                Ok(()) => {
                    record.set_status(IndexStatus::Indexed);
                    record.last_error = None;
                    log::info!("✅ Indexed {}", record.repository.full_name);
                    StatusChange::new(id, IndexStatus::Indexing, IndexStatus::Indexed)
                }
                Err(err) => {
                    let reason = format!("{:#}", err);
                    let failure = IndexerError::IndexingFailed {
                        id,
                        reason: reason.clone(),
                    };
                    log::warn!("❌ {}", failure);
                    record.set_status(IndexStatus::NotIndexed);
                    record.last_error = Some(reason.clone());
                    StatusChange::new(id, IndexStatus::Indexing, IndexStatus::NotIndexed)
                        .with_error(reason)
                }
            }
        };
        self.publish(change);
    }
}

/// Owns the working set and drives each repository through
/// `NotIndexed -> Indexing -> Indexed`.
///
/// Cloning is cheap; clones share the same working set.
#[derive(Clone)]
pub struct IndexController {
    inner: Arc<Inner>,
}

impl IndexController {
    pub fn new(
        repositories: Vec<Repository>,
        job: Arc<dyn IndexJob>,
    ) -> Result<Self, IndexerError> {
        let state = WorkingSet::from_repositories(repositories)?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                job,
                events,
                shutdown: CancellationToken::new(),
            }),
        })
    }

    pub fn list_repositories(&self) -> Vec<Repository> {
        self.inner
            .read()
            .iter()
            .map(|record| record.repository.clone())
            .collect()
    }

    pub fn get_repository(&self, id: RepositoryId) -> Result<Repository, IndexerError> {
        Ok(self.inner.read().get(id)?.repository.clone())
    }

    pub fn get_status(&self, id: RepositoryId) -> Result<IndexStatus, IndexerError> {
        Ok(self.inner.read().get(id)?.status())
    }

    pub fn last_error(&self, id: RepositoryId) -> Result<Option<String>, IndexerError> {
        Ok(self.inner.read().get(id)?.last_error.clone())
    }

    pub fn last_changed(&self, id: RepositoryId) -> Result<SystemTime, IndexerError> {
        Ok(self.inner.read().get(id)?.changed_at)
    }

    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for record in self.inner.read().iter() {
            summary.record(record.status());
        }
        summary
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.inner.events.subscribe()
    }

    /// Moves a `NotIndexed` repository to `Indexing` and schedules its job.
    ///
    /// Ineligible requests leave the state untouched and schedule nothing.
    /// Must be called from within a tokio runtime.
    #[tracing::instrument(skip(self))]
    pub fn request_index(&self, id: RepositoryId) -> Result<(), IndexerError> {
        let (repo, attempt) = {
            let mut set = self.inner.write();
            let record = set.get_mut(id)?;
            let status = record.status();
            if !status.is_actionable() {
                return Err(match status {
                    IndexStatus::Indexing => IndexerError::AlreadyIndexing(id),
                    _ => IndexerError::AlreadyIndexed(id),
                });
            }
            record.set_status(IndexStatus::Indexing);
            (record.repository.clone(), record.start_job())
        };

        log::info!("📥 Indexing requested for {}", repo.full_name);
        self.inner.publish(StatusChange::new(
            id,
            IndexStatus::NotIndexed,
            IndexStatus::Indexing,
        ));
        self.spawn_job(repo, attempt);
        Ok(())
    }

    /// Same as [`request_index`](Self::request_index) but ignores ineligible
    /// requests. Returns whether a transition happened.
    pub fn request_index_quiet(&self, id: RepositoryId) -> bool {
        match self.request_index(id) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("Ignoring index request: {}", err);
                false
            }
        }
    }

    /// Schedules jobs for repositories the source delivered as `Indexing`.
    /// Repositories that already have a job are skipped.
    pub fn resume_pending(&self) -> usize {
        let pending: Vec<(Repository, u64)> = {
            let mut set = self.inner.write();
            set.records
                .values_mut()
                .filter(|record| {
                    record.status() == IndexStatus::Indexing && !record.job_pending
                })
                .map(|record| {
                    let attempt = record.start_job();
                    (record.repository.clone(), attempt)
                })
                .collect()
        };

        let count = pending.len();
        for (repo, attempt) in pending {
            log::info!("🔁 Resuming indexing of {}", repo.full_name);
            self.spawn_job(repo, attempt);
        }
        count
    }

    /// Waits until the current job for `id` settles and returns the status it
    /// left behind: `Indexed`, or `NotIndexed` after a failure. `None` on timeout.
    pub async fn wait_until_settled(
        &self,
        id: RepositoryId,
        timeout: Duration,
    ) -> Result<Option<IndexStatus>, IndexerError> {
        let mut rx = self.subscribe();
        let current = self.get_status(id)?;
        if current != IndexStatus::Indexing {
            return Ok(Some(current));
        }

        let wait = async {
            loop {
                match rx.recv().await {
                    Ok(change) if change.id == id && change.from == IndexStatus::Indexing => {
                        return Some(change.to);
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => match self.get_status(id) {
                        Ok(IndexStatus::Indexing) => {}
                        Ok(status) => return Some(status),
                        Err(_) => return None,
                    },
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        };

        Ok(tokio::time::timeout(timeout, wait).await.unwrap_or(None))
    }

    /// Waits until `id` reaches `wanted`. Returns `false` on timeout.
    pub async fn wait_for_status(
        &self,
        id: RepositoryId,
        wanted: IndexStatus,
        timeout: Duration,
    ) -> Result<bool, IndexerError> {
        let mut rx = self.subscribe();
        if self.get_status(id)? == wanted {
            return Ok(true);
        }

        let wait = async {
            loop {
                match rx.recv().await {
                    Ok(change) if change.id == id && change.to == wanted => return true,
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        if matches!(self.get_status(id), Ok(status) if status == wanted) {
                            return true;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => return false,
                }
            }
        };

        Ok(tokio::time::timeout(timeout, wait).await.unwrap_or(false))
    }

    /// Cancels outstanding jobs. Their repositories stay `Indexing`.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
    }

    fn spawn_job(&self, repo: Repository, attempt: u64) {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let id = repo.id;
            let name = repo.full_name.clone();
            let outcome = tokio::select! {
                biased;
                _ = inner.shutdown.cancelled() => {
                    log::info!("🛑 Indexing of {} cancelled", name);
                    return;
                }
                outcome = inner.job.run(repo) => outcome,
            };
            inner.finish(id, attempt, outcome);
        });
    }
}
