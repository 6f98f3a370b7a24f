use crate::types::Repository;

/// Supplies the initial, ordered working set.
pub trait RepositorySource {
    fn load(&self) -> anyhow::Result<Vec<Repository>>;
}
