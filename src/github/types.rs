// GitHub API response types.
// Defines the repository metadata the stats cards display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository metadata shown on a repository card.
///
/// Deserialized from the `/repos/{owner}/{name}` response; unknown fields
/// are ignored. This is also the payload stored in the session cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub stargazers_count: u64,
    pub pushed_at: DateTime<Utc>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_stats_from_api_body() {
        let body = r#"{
            "id": 1,
            "full_name": "org/repo",
            "stargazers_count": 42,
            "pushed_at": "2025-12-28T10:00:00Z",
            "private": false
        }"#;

        let stats: RepoStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.stargazers_count, 42);
        assert_eq!(stats.pushed_at.to_rfc3339(), "2025-12-28T10:00:00+00:00");
    }

    #[test]
    fn test_repo_stats_requires_fields() {
        assert!(serde_json::from_str::<RepoStats>(r#"{"stargazers_count": 1}"#).is_err());
        assert!(serde_json::from_str::<RepoStats>(r#"{"message": "Not Found"}"#).is_err());
    }
}
