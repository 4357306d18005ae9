// Page bootstrap: runs the ordered initializer units once the document is ready.
// Each unit is isolated, so a failing or panicking unit never stops the ones after it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::KeyValueStore;
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::error::Result;

use super::collapsible::Collapsibles;
use super::counters::Counters;
use super::lightbox::Lightbox;
use super::navigation::Navigation;
use super::repo_stats::{RepoCard, RepoCards};
use super::scroll_top::ScrollTop;
use super::sticky_nav::StickyNav;
use super::theme::Theme;
use super::toc::TableOfContents;

/// One independent page setup routine.
///
/// A unit checks its own preconditions and returns `Ok(())` without doing
/// anything when the elements it needs are absent.
pub trait Initializer {
    fn name(&self) -> &'static str;
    fn init(&self, doc: &mut Document, ctx: &mut InitContext) -> Result<()>;
}

/// Work units hand back to the bootstrap for after the synchronous pass.
#[derive(Debug, Default)]
pub struct InitContext {
    /// Repository cards waiting for a stats lookup.
    pub repo_cards: Vec<RepoCard>,
}

/// Outcome of one bootstrap run.
#[derive(Debug, Default)]
pub struct BootReport {
    pub completed: Vec<&'static str>,
    /// Units that had already set this document up.
    pub skipped: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
    pub repo_cards: Vec<RepoCard>,
    /// Cards that received a stats summary.
    pub stats_rendered: usize,
}

/// Ordered registry of initializer units.
#[derive(Default)]
pub struct Bootstrap {
    units: Vec<Box<dyn Initializer>>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's unit order.
    ///
    /// Theme comes first so the stored colour scheme is applied before
    /// anything that changes layout. The rest are mutually independent.
    pub fn standard(config: &SiteConfig, preferences: Arc<dyn KeyValueStore>) -> Self {
        Self::new()
            .with_unit(Theme::new(preferences))
            .with_unit(Navigation)
            .with_unit(StickyNav::new(config.sticky_nav_offset))
            .with_unit(ScrollTop::new(config.scroll_threshold))
            .with_unit(Counters::new(
                config.counter_duration_ms,
                config.counter_threshold,
            ))
            .with_unit(Lightbox::new(config.lightbox_classes.clone()))
            .with_unit(Collapsibles)
            .with_unit(TableOfContents::new(config.toc_min_headings))
            .with_unit(RepoCards)
    }

    pub fn with_unit(mut self, unit: impl Initializer + 'static) -> Self {
        self.units.push(Box::new(unit));
        self
    }

    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    /// Run every unit in order against `doc`.
    pub fn run(&self, doc: &mut Document) -> BootReport {
        let mut report = BootReport::default();
        let mut ctx = InitContext::default();

        for unit in &self.units {
            let name = unit.name();
            if !doc.claim(name) {
                debug!(unit = name, "already initialized");
                report.skipped.push(name);
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| unit.init(doc, &mut ctx))) {
                Ok(Ok(())) => report.completed.push(name),
                Ok(Err(e)) => {
                    warn!(unit = name, error = %e, "page unit failed");
                    report.failed.push((name, e.to_string()));
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(unit = name, panic = %message, "page unit panicked");
                    report.failed.push((name, message));
                }
            }
        }

        report.repo_cards = ctx.repo_cards;
        info!(
            completed = report.completed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "bootstrap finished"
        );
        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
