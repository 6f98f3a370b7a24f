use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::RepositorySource;
use crate::types::Repository;

/// Reads the working set from a JSON array of repositories.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RepositorySource for FileSource {
    fn load(&self) -> anyhow::Result<Vec<Repository>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading repositories from {}", self.path.display()))?;
        let repos: Vec<Repository> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing repositories in {}", self.path.display()))?;
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexStatus;
    use std::io::Write;

    #[test]
    fn loads_repositories_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 10, "name": "b", "fullName": "me/b", "indexStatus": "indexed"}},
                {{"id": 5, "name": "a", "fullName": "me/a", "stars": 3}}
            ]"#
        )
        .unwrap();

        let repos = FileSource::new(file.path()).load().unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].id, 10);
        assert_eq!(repos[0].index_status, IndexStatus::Indexed);
        assert_eq!(repos[1].id, 5);
        assert_eq!(repos[1].stars, 3);
        assert_eq!(repos[1].index_status, IndexStatus::NotIndexed);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = FileSource::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("nope.json"));
    }

    #[test]
    fn rejects_negative_stars() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "name": "a", "fullName": "me/a", "stars": -1}}]"#).unwrap();
        assert!(FileSource::new(file.path()).load().is_err());
    }
}
