// Table of contents.
// Builds a linked list of the main content's section headings into a placeholder.

use crate::dom::{Document, EventKind, NodeId, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

pub const PLACEHOLDER_ID: &str = "toc-placeholder";

pub struct TableOfContents {
    min_headings: usize,
}

impl TableOfContents {
    pub fn new(min_headings: usize) -> Self {
        Self { min_headings }
    }
}

/// `h2`/`h3` elements inside any `main`, in document order.
fn section_headings(doc: &Document) -> Vec<NodeId> {
    doc.query_tags_within(doc.root(), &["h2", "h3"])
        .into_iter()
        .filter(|h| {
            let mut current = doc.parent(*h);
            while let Some(n) = current {
                if doc.tag(n) == "main" {
                    return true;
                }
                current = doc.parent(n);
            }
            false
        })
        .collect()
}

impl Initializer for TableOfContents {
    fn name(&self) -> &'static str {
        "toc"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        let Some(placeholder) = doc.get_element_by_id(PLACEHOLDER_ID) else {
            return Ok(());
        };

        let headings = section_headings(doc);
        if headings.len() < self.min_headings {
            return Ok(());
        }

        let container = doc.create_element("div");
        doc.add_class(container, "toc-container");
        let title = doc.element(container, "div", &["toc-title"]);
        doc.set_text(title, "Table of Contents");
        let list = doc.element(container, "ul", &["toc-list"]);

        for (index, heading) in headings.into_iter().enumerate() {
            let existing = doc
                .attribute(heading, "id")
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            let id = match existing {
                Some(id) => id,
                None => {
                    let id = format!("section-{}", index);
                    doc.set_attribute(heading, "id", &id);
                    id
                }
            };

            let level = format!("toc-{}", doc.tag(heading));
            let item = doc.element(list, "li", &["toc-item", level.as_str()]);
            let link = doc.element(item, "a", &[]);
            doc.set_attribute(link, "href", &format!("#{}", id));
            let text = doc.text_content(heading);
            doc.set_text(link, &text);

            doc.add_listener(Target::Node(link), EventKind::Click, move |d, _| {
                if let Some(target) = d.get_element_by_id(&id) {
                    d.scroll_into_view(target);
                }
            });
        }

        doc.append_child(placeholder, container);
        Ok(())
    }
}
