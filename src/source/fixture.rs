use super::RepositorySource;
use crate::types::{IndexStatus, Repository};

/// Demo working set served when no repository file is configured.
#[derive(Clone, Debug, Default)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn repositories() -> Vec<Repository> {
        vec![
            Repository::new(1, "IyedBecheikh/raghub")
                .with_description("GitHub Repository RAG Indexing SaaS")
                .with_stars(42)
                .with_language("TypeScript")
                .with_status(IndexStatus::Indexed),
            Repository::new(2, "IyedBecheikh/awesome-project")
                .with_description("An awesome project with great features")
                .with_stars(128)
                .with_language("JavaScript"),
            Repository::new(3, "IyedBecheikh/private-repo")
                .with_description("A private repository for internal use")
                .with_private(true)
                .with_stars(5)
                .with_language("Python")
                .with_status(IndexStatus::Indexing),
            Repository::new(4, "IyedBecheikh/data-science-toolkit")
                .with_description("Collection of data science utilities and tools")
                .with_stars(256)
                .with_language("Python"),
        ]
    }
}

impl RepositorySource for FixtureSource {
    fn load(&self) -> anyhow::Result<Vec<Repository>> {
        Ok(Self::repositories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_covers_every_status() {
        let repos = FixtureSource.load().unwrap();
        let ids: Vec<_> = repos.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let statuses: Vec<_> = repos.iter().map(|r| r.index_status).collect();
        assert_eq!(
            statuses,
            vec![
                IndexStatus::Indexed,
                IndexStatus::NotIndexed,
                IndexStatus::Indexing,
                IndexStatus::NotIndexed,
            ]
        );
        assert!(repos[2].is_private);
    }
}
