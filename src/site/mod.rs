// Site interactivity module.
// Page units, their bootstrap order, and the entry point that runs them.

pub mod bootstrap;
pub mod collapsible;
pub mod counters;
pub mod lightbox;
pub mod navigation;
pub mod repo_stats;
pub mod scroll_top;
pub mod sticky_nav;
pub mod theme;
pub mod toc;

use std::sync::Arc;

use crate::cache::{FileStore, KeyValueStore, MemoryStore};
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::stats::StatsFetcher;

pub use bootstrap::{BootReport, Bootstrap, InitContext, Initializer};
pub use repo_stats::{RepoCard, RepoStatsLoader};

/// Everything that runs when a page becomes ready.
pub struct Site {
    bootstrap: Bootstrap,
    loader: RepoStatsLoader,
}

impl Site {
    pub fn new(
        config: &SiteConfig,
        fetcher: StatsFetcher,
        preferences: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            bootstrap: Bootstrap::standard(config, preferences),
            loader: RepoStatsLoader::new(fetcher),
        }
    }

    /// Wire up the live GitHub client, a session cache, and on-disk preferences.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let client = GitHubClient::from_config(config)?;
        let fetcher = StatsFetcher::new(Arc::new(client), Arc::new(MemoryStore::new()))
            .with_ttl(config.stats_ttl);
        let preferences = FileStore::open_default()?;
        Ok(Self::new(config, fetcher, Arc::new(preferences)))
    }

    /// Run the bootstrap, then load stats for any repository cards it found.
    pub async fn start(&self, doc: &mut Document) -> BootReport {
        let mut report = self.bootstrap.run(doc);
        let cards = report.repo_cards.clone();
        if !cards.is_empty() {
            report.stats_rendered = self.loader.load(doc, cards).await;
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::dom::NodeId;
    use crate::error::SiteError;
    use crate::github::RepoStats;
    use crate::stats::StatsSource;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Knows a fixed set of repositories; everything else is a 404.
    #[derive(Default)]
    struct FixedSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StatsSource for FixedSource {
        async fn fetch_stats(&self, identifier: &str) -> Result<RepoStats> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match identifier {
                "org/known" => Ok(RepoStats {
                    stargazers_count: 12,
                    pushed_at: Utc.with_ymd_and_hms(2025, 12, 28, 0, 0, 0).unwrap(),
                }),
                other => Err(SiteError::NotFound(other.to_string())),
            }
        }
    }

    fn card(doc: &mut Document, repo: &str) -> (NodeId, NodeId) {
        let body = doc.body();
        let card = doc.element(body, "article", &["card"]);
        doc.set_attribute(card, "data-repo", repo);
        let card_body = doc.element(card, "div", &["card-body"]);
        (card, card_body)
    }

    fn site(source: Arc<FixedSource>) -> Site {
        let fetcher = StatsFetcher::new(source, Arc::new(MemoryStore::new()))
            .with_clock(Arc::new(ManualClock::new(0)));
        Site::new(
            &SiteConfig::default(),
            fetcher,
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn test_start_renders_known_cards_only() {
        let source = Arc::new(FixedSource::default());
        let site = site(source.clone());

        let mut doc = Document::new();
        let (_, known_body) = card(&mut doc, "org/known");
        let (_, missing_body) = card(&mut doc, "org/missing");
        let (_, malformed_body) = card(&mut doc, "not-a-repo");

        let report = site.start(&mut doc).await;

        assert!(report.failed.is_empty());
        assert_eq!(report.repo_cards.len(), 3);
        assert_eq!(report.stats_rendered, 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);

        assert!(doc.query_class_within(known_body, "repo-stats").is_some());
        assert!(doc.children(missing_body).is_empty());
        assert!(doc.children(malformed_body).is_empty());
    }

    #[tokio::test]
    async fn test_reload_uses_cache() {
        let source = Arc::new(FixedSource::default());
        let site = site(source.clone());

        let mut first = Document::new();
        card(&mut first, "org/known");
        site.start(&mut first).await;

        let mut second = Document::new();
        card(&mut second, "org/known");
        let report = site.start(&mut second).await;

        assert_eq!(report.stats_rendered, 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_page_without_cards_skips_lookups() {
        let source = Arc::new(FixedSource::default());
        let site = site(source.clone());

        let mut doc = Document::new();
        let report = site.start(&mut doc).await;

        assert!(report.repo_cards.is_empty());
        assert_eq!(report.stats_rendered, 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
