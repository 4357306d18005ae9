// Collapsible sections.
// A trigger expands the content element directly after it.

use crate::dom::{Document, EventKind, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

pub struct Collapsibles;

impl Initializer for Collapsibles {
    fn name(&self) -> &'static str {
        "collapsibles"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        for trigger in doc.query_all_class("collapsible-trigger") {
            doc.add_listener(Target::Node(trigger), EventKind::Click, move |d, _| {
                let Some(content) = d
                    .next_element_sibling(trigger)
                    .filter(|c| d.has_class(*c, "collapsible-content"))
                else {
                    return;
                };

                if d.toggle_class(trigger, "active") {
                    let height = format!("{}px", d.scroll_height(content));
                    d.set_style(content, "max-height", &height);
                } else {
                    d.set_style(content, "max-height", "0");
                }
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_and_collapse() {
        let mut doc = Document::new();
        let section = doc.element(doc.body(), "section", &[]);
        let trigger = doc.element(section, "button", &["collapsible-trigger"]);
        let content = doc.element(section, "div", &["collapsible-content"]);
        doc.set_scroll_height(content, 240);

        Collapsibles
            .init(&mut doc, &mut InitContext::default())
            .unwrap();

        doc.click(trigger);
        assert!(doc.has_class(trigger, "active"));
        assert_eq!(doc.style(content, "max-height"), Some("240px"));

        doc.click(trigger);
        assert!(!doc.has_class(trigger, "active"));
        assert_eq!(doc.style(content, "max-height"), Some("0"));
    }

    #[test]
    fn test_trigger_without_content_does_nothing() {
        let mut doc = Document::new();
        let section = doc.element(doc.body(), "section", &[]);
        let trigger = doc.element(section, "button", &["collapsible-trigger"]);
        doc.element(section, "p", &[]);

        Collapsibles
            .init(&mut doc, &mut InitContext::default())
            .unwrap();

        doc.click(trigger);
        assert!(!doc.has_class(trigger, "active"));
    }
}
