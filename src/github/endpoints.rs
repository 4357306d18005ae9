// GitHub API endpoint functions.
// Provides the typed repository lookup used by the stats fetcher.

use async_trait::async_trait;

use crate::error::Result;
use crate::stats::StatsSource;

use super::client::GitHubClient;
use super::types::RepoStats;

impl GitHubClient {
    /// Get stats for a repository given as `owner/name`.
    ///
    /// The identifier is inserted into the path as-is; a malformed one simply
    /// produces a failed request.
    pub async fn get_repo_stats(&self, identifier: &str) -> Result<RepoStats> {
        let response = self.get(&format!("/repos/{}", identifier)).await?;
        let stats: RepoStats = response.json().await?;
        Ok(stats)
    }
}

#[async_trait]
impl StatsSource for GitHubClient {
    async fn fetch_stats(&self, identifier: &str) -> Result<RepoStats> {
        self.get_repo_stats(identifier).await
    }
}
