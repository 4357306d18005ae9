// Dark mode toggle.
// Applies the stored colour scheme preference and persists changes to it.

use std::sync::Arc;

use tracing::warn;

use crate::cache::KeyValueStore;
use crate::dom::{Document, EventKind, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

/// Durable storage key of the dark mode flag.
pub const PREFERENCE_KEY: &str = "darkMode";

pub const DARK_MODE_CLASS: &str = "dark-mode";

pub struct Theme {
    preferences: Arc<dyn KeyValueStore>,
}

impl Theme {
    pub fn new(preferences: Arc<dyn KeyValueStore>) -> Self {
        Self { preferences }
    }
}

impl Initializer for Theme {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        let button = doc.create_element("button");
        doc.add_class(button, "theme-toggle");
        doc.set_attribute(button, "aria-label", "Toggle dark mode");
        let moon = doc.element(button, "span", &["icon-moon"]);
        doc.set_text(moon, "\u{263e}");
        let sun = doc.element(button, "span", &["icon-sun"]);
        doc.set_text(sun, "\u{2600}");

        // Sits before the hamburger when there is one.
        let container = doc
            .query_class("navbar")
            .and_then(|nav| doc.query_class_within(nav, "container"));
        if let Some(container) = container {
            let toggle = doc
                .query_class_within(container, "nav-toggle")
                .filter(|t| doc.parent(*t) == Some(container));
            doc.insert_before(container, button, toggle);
        }

        let preferences = Arc::clone(&self.preferences);
        doc.add_listener(Target::Node(button), EventKind::Click, move |d, _| {
            let body = d.body();
            let dark = d.toggle_class(body, DARK_MODE_CLASS);
            if let Err(e) = preferences.set(PREFERENCE_KEY, dark.to_string()) {
                warn!(error = %e, "failed to save theme preference");
            }
        });

        let saved = self.preferences.get(PREFERENCE_KEY)?;
        let dark = match saved.as_deref() {
            None | Some("") => doc.window().prefers_dark,
            Some(value) => value == "true",
        };
        if dark {
            let body = doc.body();
            doc.add_class(body, DARK_MODE_CLASS);
        }

        Ok(())
    }
}
