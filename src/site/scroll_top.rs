// Scroll-to-top button.
// Shown past a scroll threshold; clicking it returns the window to the top.

use crate::dom::{Document, EventKind, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

pub struct ScrollTop {
    threshold: u32,
}

impl ScrollTop {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }
}

impl Initializer for ScrollTop {
    fn name(&self) -> &'static str {
        "scroll-top"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        // Reuse a button shipped in the markup, otherwise create one.
        let button = match doc.query_class("scroll-top") {
            Some(button) => button,
            None => {
                let body = doc.body();
                let button = doc.element(body, "button", &["scroll-top"]);
                doc.set_text(button, "\u{2191}");
                doc.set_attribute(button, "aria-label", "Scroll to top");
                button
            }
        };

        let threshold = self.threshold;
        doc.add_listener(Target::Window, EventKind::Scroll, move |d, _| {
            if d.window().scroll_y > threshold {
                d.add_class(button, "visible");
            } else {
                d.remove_class(button, "visible");
            }
        });

        doc.add_listener(Target::Node(button), EventKind::Click, |d, _| {
            d.scroll_to(0);
        });

        Ok(())
    }
}
