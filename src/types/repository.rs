use serde::{Deserialize, Serialize};

use super::IndexStatus;

pub type RepositoryId = u64;

/// A source-control project in the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: RepositoryId,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub index_status: IndexStatus,
}

impl Repository {
    pub fn new(id: RepositoryId, full_name: &str) -> Self {
        let name = full_name
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(full_name)
            .to_string();
        Self {
            id,
            name,
            full_name: full_name.to_string(),
            description: None,
            is_private: false,
            stars: 0,
            language: None,
            index_status: IndexStatus::NotIndexed,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_stars(mut self, stars: u32) -> Self {
        self.stars = stars;
        self
    }

    pub fn with_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    pub fn with_status(mut self, status: IndexStatus) -> Self {
        self.index_status = status;
        self
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("No description available")
    }
}
