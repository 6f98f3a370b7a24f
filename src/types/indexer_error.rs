use thiserror::Error;

use super::RepositoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexerError {
    #[error("unknown repository: {0}")]
    UnknownRepository(RepositoryId),
    #[error("repository {0} is already being indexed")]
    AlreadyIndexing(RepositoryId),
    #[error("repository {0} is already indexed")]
    AlreadyIndexed(RepositoryId),
    #[error("indexing repository {id} failed: {reason}")]
    IndexingFailed { id: RepositoryId, reason: String },
    #[error("duplicate repository id: {0}")]
    DuplicateRepository(RepositoryId),
}
