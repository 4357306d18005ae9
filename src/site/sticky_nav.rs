// Sticky navbar.
// Marks the navbar as scrolled once the page moves past an offset.

use crate::dom::{Document, EventKind, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

pub struct StickyNav {
    offset: u32,
}

impl StickyNav {
    pub fn new(offset: u32) -> Self {
        Self { offset }
    }
}

impl Initializer for StickyNav {
    fn name(&self) -> &'static str {
        "sticky-nav"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        let Some(navbar) = doc.query_class("navbar") else {
            return Ok(());
        };

        let offset = self.offset;
        doc.add_listener(Target::Window, EventKind::Scroll, move |d, _| {
            if d.window().scroll_y > offset {
                d.add_class(navbar, "scrolled");
            } else {
                d.remove_class(navbar, "scrolled");
            }
        });

        Ok(())
    }
}
