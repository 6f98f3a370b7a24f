pub mod app;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod context;
pub mod controller;
pub mod rest;
pub mod source;
pub mod tracing;
pub mod types;

pub use controller::{DelayJob, IndexController, IndexJob, StatusChange};
pub use types::{IndexStatus, IndexerError, Repository, RepositoryId, SessionUser};
