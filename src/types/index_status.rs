use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStatus {
    #[default]
    NotIndexed,
    Indexing,
    Indexed,
}

impl IndexStatus {
    /// Only repositories that were never indexed accept an index request.
    pub fn is_actionable(self) -> bool {
        matches!(self, IndexStatus::NotIndexed)
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexStatus::NotIndexed => "Not Indexed",
            IndexStatus::Indexing => "Indexing...",
            IndexStatus::Indexed => "Indexed",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexStatus::NotIndexed => "not_indexed",
            IndexStatus::Indexing => "indexing",
            IndexStatus::Indexed => "indexed",
        }
    }
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown index status: {0}")]
pub struct ParseIndexStatusError(pub String);

impl FromStr for IndexStatus {
    type Err = ParseIndexStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_indexed" => Ok(IndexStatus::NotIndexed),
            "indexing" => Ok(IndexStatus::Indexing),
            "indexed" => Ok(IndexStatus::Indexed),
            other => Err(ParseIndexStatusError(other.to_string())),
        }
    }
}
