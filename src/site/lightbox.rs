// Image lightbox.
// One shared overlay shows a clicked image full size until dismissed.

use crate::dom::{Document, EventKind, NodeId, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

pub struct Lightbox {
    classes: Vec<String>,
}

impl Lightbox {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    fn triggers(&self, doc: &Document) -> Vec<NodeId> {
        doc.query_tags_within(doc.root(), &["img"])
            .into_iter()
            .filter(|img| self.classes.iter().any(|c| doc.has_class(*img, c)))
            .collect()
    }
}

impl Initializer for Lightbox {
    fn name(&self) -> &'static str {
        "lightbox"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        let images = self.triggers(doc);
        if images.is_empty() {
            return Ok(());
        }

        let body = doc.body();
        let overlay = doc.element(body, "div", &["lightbox-overlay"]);
        let viewer = doc.element(overlay, "img", &["lightbox-image"]);
        let close = doc.element(overlay, "button", &["lightbox-close"]);
        doc.set_text(close, "\u{00d7}");
        doc.set_attribute(close, "aria-label", "Close lightbox");

        for image in images {
            doc.add_listener(Target::Node(image), EventKind::Click, move |d, _| {
                let src = d.attribute(image, "src").unwrap_or_default().to_string();
                let alt = d.attribute(image, "alt").unwrap_or_default().to_string();
                d.set_attribute(viewer, "src", &src);
                d.set_attribute(viewer, "alt", &alt);
                d.add_class(overlay, "active");
                let body = d.body();
                d.set_style(body, "overflow", "hidden");
            });
        }

        doc.add_listener(Target::Node(close), EventKind::Click, move |d, _| {
            close_overlay(d, overlay);
        });

        // Backdrop clicks only; clicks on the image bubble here too.
        doc.add_listener(Target::Node(overlay), EventKind::Click, move |d, e| {
            if e.target == Some(overlay) {
                close_overlay(d, overlay);
            }
        });

        doc.add_listener(Target::Document, EventKind::KeyDown, move |d, e| {
            if e.key.as_deref() == Some("Escape") && d.has_class(overlay, "active") {
                close_overlay(d, overlay);
            }
        });

        Ok(())
    }
}

fn close_overlay(doc: &mut Document, overlay: NodeId) {
    doc.remove_class(overlay, "active");
    let body = doc.body();
    doc.set_style(body, "overflow", "");
}
