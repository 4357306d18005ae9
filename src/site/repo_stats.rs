// Repository stats on project cards.
// Cards are collected during bootstrap; lookups then run concurrently and render as they finish.

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::github::RepoStats;
use crate::stats::StatsFetcher;

use super::bootstrap::{InitContext, Initializer};

/// Attribute naming the repository a card describes.
pub const REPO_ATTRIBUTE: &str = "data-repo";

/// A card waiting for its repository stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCard {
    pub node: NodeId,
    pub repo: String,
}

/// Bootstrap unit that collects `[data-repo]` cards.
pub struct RepoCards;

impl Initializer for RepoCards {
    fn name(&self) -> &'static str {
        "repo-stats"
    }

    fn init(&self, doc: &mut Document, ctx: &mut InitContext) -> Result<()> {
        for node in doc.query_all_attr(REPO_ATTRIBUTE) {
            let repo = doc.attribute(node, REPO_ATTRIBUTE).unwrap_or_default();
            ctx.repo_cards.push(RepoCard {
                node,
                repo: repo.to_string(),
            });
        }
        Ok(())
    }
}

/// Format a push timestamp the way the card shows it (M/D/YYYY).
pub fn format_updated(stats: &RepoStats) -> String {
    stats.pushed_at.format("%-m/%-d/%Y").to_string()
}

/// Attach a stats summary to `card`. Returns false if the card has no slot for it.
pub fn render_stats(doc: &mut Document, card: &RepoCard, stats: &RepoStats) -> bool {
    let footer = doc.query_class_within(card.node, "card-footer");
    let card_body = doc.query_class_within(card.node, "card-body");

    let summary = doc.create_element("div");
    doc.add_class(summary, "repo-stats");

    let stars = doc.element(summary, "div", &["stat-item"]);
    doc.set_attribute(stars, "title", "Stars");
    let icon = doc.element(stars, "span", &["stat-icon"]);
    doc.set_text(icon, "\u{2605}");
    let count = doc.element(stars, "span", &[]);
    doc.set_text(count, &stats.stargazers_count.to_string());

    let updated = doc.element(summary, "div", &["stat-item"]);
    doc.set_attribute(updated, "title", "Last Updated");
    let icon = doc.element(updated, "span", &["stat-icon"]);
    doc.set_text(icon, "\u{21bb}");
    let when = doc.element(updated, "span", &[]);
    doc.set_text(when, &format!("Updated {}", format_updated(stats)));

    match (footer, card_body) {
        (Some(footer), _) => {
            let Some(parent) = doc.parent(footer) else {
                return false;
            };
            let after = doc.next_element_sibling(footer);
            doc.insert_before(parent, summary, after);
        }
        (None, Some(card_body)) => doc.append_child(card_body, summary),
        (None, None) => {
            warn!(repo = %card.repo, "repository card has no footer or body for stats");
            return false;
        }
    }

    true
}

/// Resolves stats for collected cards and renders them.
#[derive(Clone)]
pub struct RepoStatsLoader {
    fetcher: StatsFetcher,
}

impl RepoStatsLoader {
    pub fn new(fetcher: StatsFetcher) -> Self {
        Self { fetcher }
    }

    /// Look every card up concurrently, rendering each as its lookup finishes.
    ///
    /// A card whose lookup fails is left unchanged; nothing is retried.
    /// Returns the number of cards that received a summary.
    pub async fn load(&self, doc: &mut Document, cards: Vec<RepoCard>) -> usize {
        let mut lookups = JoinSet::new();
        for card in cards {
            let fetcher = self.fetcher.clone();
            lookups.spawn(async move {
                let stats = fetcher.get_repository_stats(&card.repo).await;
                (card, stats)
            });
        }

        let mut rendered = 0;
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((card, Some(stats))) => {
                    if render_stats(doc, &card, &stats) {
                        debug!(repo = %card.repo, stars = stats.stargazers_count, "rendered stats");
                        rendered += 1;
                    }
                }
                Ok((card, None)) => {
                    warn!(repo = %card.repo, "no GitHub stats for card");
                }
                Err(e) => {
                    warn!(error = %e, "stats lookup task failed");
                }
            }
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stats() -> RepoStats {
        RepoStats {
            stargazers_count: 42,
            pushed_at: Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_collects_cards_in_order() {
        let mut doc = Document::new();
        let a = doc.element(doc.body(), "article", &["card"]);
        doc.set_attribute(a, REPO_ATTRIBUTE, "org/a");
        let b = doc.element(doc.body(), "article", &["card"]);
        doc.set_attribute(b, REPO_ATTRIBUTE, "no-slash");

        let mut ctx = InitContext::default();
        RepoCards.init(&mut doc, &mut ctx).unwrap();

        assert_eq!(
            ctx.repo_cards,
            vec![
                RepoCard {
                    node: a,
                    repo: "org/a".to_string()
                },
                RepoCard {
                    node: b,
                    repo: "no-slash".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_format_updated() {
        assert_eq!(format_updated(&stats()), "3/7/2025");
    }

    #[test]
    fn test_render_after_footer() {
        let mut doc = Document::new();
        let card = doc.element(doc.body(), "article", &["card"]);
        let card_body = doc.element(card, "div", &["card-body"]);
        let footer = doc.element(card, "div", &["card-footer"]);
        let card = RepoCard {
            node: card,
            repo: "org/repo".to_string(),
        };

        assert!(render_stats(&mut doc, &card, &stats()));

        let summary = doc.query_class("repo-stats").unwrap();
        assert_eq!(doc.children(card.node), &[card_body, footer, summary]);
        assert_eq!(doc.text_content(summary), "\u{2605}42\u{21bb}Updated 3/7/2025");
    }

    #[test]
    fn test_render_into_body_without_footer() {
        let mut doc = Document::new();
        let card = doc.element(doc.body(), "article", &["card"]);
        let card_body = doc.element(card, "div", &["card-body"]);
        let card = RepoCard {
            node: card,
            repo: "org/repo".to_string(),
        };

        assert!(render_stats(&mut doc, &card, &stats()));
        let summary = doc.query_class("repo-stats").unwrap();
        assert_eq!(doc.parent(summary), Some(card_body));
    }

    #[test]
    fn test_render_without_slot_leaves_card() {
        let mut doc = Document::new();
        let node = doc.element(doc.body(), "article", &["card"]);
        let card = RepoCard {
            node,
            repo: "org/repo".to_string(),
        };

        assert!(!render_stats(&mut doc, &card, &stats()));
        assert!(doc.query_class("repo-stats").is_none());
        assert!(doc.children(node).is_empty());
    }
}
