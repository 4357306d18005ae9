// Repository stats lookup with a read-through session cache.
// Cache hits never touch the network; failures are logged and reported as absent.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::{CachedData, KeyValueStore, read_cached, write_cached};
use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_STATS_TTL;
use crate::error::Result;
use crate::github::RepoStats;

/// Prefix of every stats cache key.
pub const CACHE_KEY_PREFIX: &str = "gh_stats";

/// Remote source of repository stats.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_stats(&self, identifier: &str) -> Result<RepoStats>;
}

/// Cache key for a repository identifier.
pub fn cache_key(identifier: &str) -> String {
    format!("{}_{}", CACHE_KEY_PREFIX, identifier)
}

/// Resolves repository stats, consulting the cache before the network.
#[derive(Clone)]
pub struct StatsFetcher {
    source: Arc<dyn StatsSource>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl StatsFetcher {
    pub fn new(source: Arc<dyn StatsSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            source,
            store,
            clock: Arc::new(SystemClock),
            ttl: DEFAULT_STATS_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Look up a fresh cached entry without touching the network.
    ///
    /// Unreadable or corrupt entries count as a miss.
    pub fn cached(&self, identifier: &str) -> Option<RepoStats> {
        let key = cache_key(identifier);
        match read_cached::<RepoStats>(self.store.as_ref(), &key) {
            Ok(Some(entry)) if entry.is_fresh(self.clock.now_millis(), self.ttl) => {
                Some(entry.data)
            }
            Ok(Some(entry)) => {
                debug!(repo = %identifier, age_ms = entry.age_millis(self.clock.now_millis()), "stats cache entry stale");
                None
            }
            Ok(None) => None,
            Err(e) => {
                debug!(repo = %identifier, error = %e, "ignoring unreadable stats cache entry");
                None
            }
        }
    }

    /// Get stats for `identifier`, or `None` if they cannot be obtained.
    ///
    /// Never fails: network and decoding errors are logged and turned into
    /// `None`, and nothing is cached for them so the next call retries.
    pub async fn get_repository_stats(&self, identifier: &str) -> Option<RepoStats> {
        if let Some(stats) = self.cached(identifier) {
            debug!(repo = %identifier, "stats cache hit");
            return Some(stats);
        }

        match self.refresh(identifier).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(repo = %identifier, error = %e, "failed to load GitHub stats");
                None
            }
        }
    }

    /// Fetch from the source and write the result back to the cache.
    async fn refresh(&self, identifier: &str) -> Result<RepoStats> {
        debug!(repo = %identifier, "stats cache miss, fetching");
        let stats = self.source.fetch_stats(identifier).await?;

        let key = cache_key(identifier);
        if let Err(e) = write_cached(self.store.as_ref(), &key, &stats, self.clock.now_millis()) {
            warn!(repo = %identifier, error = %e, "failed to cache GitHub stats");
        }

        Ok(stats)
    }

    /// Read the raw cache envelope for `identifier`, fresh or not.
    pub fn cache_entry(&self, identifier: &str) -> Option<CachedData<RepoStats>> {
        read_cached(self.store.as_ref(), &cache_key(identifier))
            .ok()
            .flatten()
    }
}
