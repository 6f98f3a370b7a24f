mod index_status;
mod indexer_error;
mod repository;
mod session_user;

pub use index_status::{IndexStatus, ParseIndexStatusError};
pub use indexer_error::IndexerError;
pub use repository::{Repository, RepositoryId};
pub use session_user::SessionUser;
