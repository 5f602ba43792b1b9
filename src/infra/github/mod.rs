//! GitHub REST client for repository lifecycle operations.
//!
//! Provides `RepositoryClient`, a reqwest-based client holding an explicit
//! authentication session and the last response it received.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub(crate) mod mock;
mod repo;
mod user;

pub use client::{ClientConfig, DEFAULT_API_BASE_URL, RepositoryClient};
pub use error::GitHubError;
pub use repo::{RepositoryDescriptor, RepositorySummary, contains_repository};
