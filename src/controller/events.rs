use serde::Serialize;

use crate::types::{IndexStatus, RepositoryId};

/// Emitted after every status transition, once the working set lock is released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub id: RepositoryId,
    pub from: IndexStatus,
    pub to: IndexStatus,
    pub error: Option<String>,
}

impl StatusChange {
    pub fn new(id: RepositoryId, from: IndexStatus, to: IndexStatus) -> Self {
        Self {
            id,
            from,
            to,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Per-status counts over the working set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub not_indexed: usize,
    pub indexing: usize,
    pub indexed: usize,
}

impl StatusSummary {
    pub fn record(&mut self, status: IndexStatus) {
        match status {
            IndexStatus::NotIndexed => self.not_indexed += 1,
            IndexStatus::Indexing => self.indexing += 1,
            IndexStatus::Indexed => self.indexed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.not_indexed + self.indexing + self.indexed
    }
}
