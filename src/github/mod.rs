// GitHub API module.
// Provides the client and types for looking up repository metadata.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::*;
