mod file;
mod fixture;
mod traits;

pub use file::FileSource;
pub use fixture::FixtureSource;
pub use traits::RepositorySource;
