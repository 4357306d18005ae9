// Navigation menu toggle.
// Flips the toggle's expanded state and closes the open menu on outside clicks.

use crate::dom::{Document, EventKind, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

/// Hamburger menu behaviour for `.nav-toggle` / `.nav-links`.
pub struct Navigation;

impl Initializer for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        let Some(toggle) = doc.query_class("nav-toggle") else {
            return Ok(());
        };
        let links = doc.query_class("nav-links");

        doc.add_listener(Target::Node(toggle), EventKind::Click, move |d, _| {
            let expanded = d.attribute(toggle, "aria-expanded") == Some("true");
            d.set_attribute(toggle, "aria-expanded", if expanded { "false" } else { "true" });
            if let Some(links) = links {
                d.toggle_class(links, "active");
            }
        });

        if let Some(links) = links {
            doc.add_listener(Target::Document, EventKind::Click, move |d, e| {
                let Some(target) = e.target else {
                    return;
                };
                if !d.contains(links, target)
                    && !d.contains(toggle, target)
                    && d.has_class(links, "active")
                {
                    d.remove_class(links, "active");
                    d.set_attribute(toggle, "aria-expanded", "false");
                }
            });
        }

        Ok(())
    }
}
