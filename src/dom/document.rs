// In-memory document tree, window state, listener registry, and frame queue.
// Single-threaded: handlers receive the document mutably while they run.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use super::event::{Event, EventKind, Handler, Listener, ListenerId, Target};

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    scroll_height: u32,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            scroll_height: 0,
        }
    }
}

/// Viewport state visible to the page units.
#[derive(Debug, Clone, Default)]
pub struct Window {
    pub scroll_y: u32,
    /// Whether the user prefers a dark colour scheme.
    pub prefers_dark: bool,
    /// Last element scrolled into view.
    pub scrolled_into_view: Option<NodeId>,
}

type FrameCallback = Box<dyn FnOnce(&mut Document, f64)>;

/// A page: element tree rooted at `html`, with a `body` child.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    window: Window,
    listeners: Vec<Listener>,
    next_listener: u64,
    frames: Vec<FrameCallback>,
    now: f64,
    claimed: HashSet<&'static str>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::new("html")],
            root: NodeId(0),
            body: NodeId(0),
            window: Window::default(),
            listeners: Vec::new(),
            next_listener: 1,
            frames: Vec::new(),
            now: 0.0,
            claimed: HashSet::new(),
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }


    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element with classes and append it to `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create_element(tag);
        for class in classes {
            self.add_class(node, class);
        }
        self.append_child(parent, node);
        node
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` into `parent` before `reference`, or at the end.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        self.detach(child);
        let index = reference
            .and_then(|r| self.nodes[parent.0].children.iter().position(|c| *c == r))
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|c| *c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev());
        }
        out
    }


    /// First attached element carrying `class`.
    pub fn query_class(&self, class: &str) -> Option<NodeId> {
        self.query_class_within(self.root, class)
    }

    pub fn query_class_within(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }

    pub fn query_all_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Attached elements carrying attribute `name`.
    pub fn query_all_attr(&self, name: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| self.attribute(*n, name).is_some())
            .collect()
    }

    /// Descendants of `scope` whose tag is one of `tags`.
    pub fn query_tags_within(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| tags.contains(&self.tag(*n)))
            .collect()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(id))
    }


    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    /// Toggle `class`, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].styles.get(property).map(String::as_str)
    }

    /// Set an inline style; an empty value removes it.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.nodes[node.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = self.nodes[node.0].text.clone();
        for child in self.children(node) {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    /// Replace all content of `node` with `text`.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].text = text.to_string();
    }

    pub fn scroll_height(&self, node: NodeId) -> u32 {
        self.nodes[node.0].scroll_height
    }

    /// Set the rendered content height of `node`.
    pub fn set_scroll_height(&mut self, node: NodeId, height: u32) {
        self.nodes[node.0].scroll_height = height;
    }


    pub fn add_listener<F>(&mut self, target: Target, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&mut Document, &Event) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| l.id != id);
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Number of listeners of `kind` attached to `target`.
    pub fn listener_count(&self, target: Target, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    fn dispatch(&mut self, targets: &[Target], event: Event) {
        for target in targets {
            let handlers: Vec<(ListenerId, Handler)> = self
                .listeners
                .iter()
                .filter(|l| l.kind == event.kind && l.target == *target)
                .map(|l| (l.id, Rc::clone(&l.handler)))
                .collect();

            for (id, handler) in handlers {
                // Removed by an earlier handler in this dispatch.
                if !self.has_listener(id) {
                    continue;
                }
                let event = Event {
                    listener: id,
                    ..event.clone()
                };
                handler(&mut *self, &event);
            }
        }
    }

    /// Click `node`; the event bubbles through its ancestors to the document.
    pub fn click(&mut self, node: NodeId) {
        let mut targets = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            targets.push(Target::Node(n));
            current = self.parent(n);
        }
        targets.push(Target::Document);

        self.dispatch(&targets, Self::event(EventKind::Click, Some(node)));
    }

    /// Scroll the window to `y` and notify scroll listeners.
    pub fn scroll_to(&mut self, y: u32) {
        self.window.scroll_y = y;
        self.dispatch(&[Target::Window], Self::event(EventKind::Scroll, None));
    }

    pub fn key_down(&mut self, key: &str) {
        let mut event = Self::event(EventKind::KeyDown, None);
        event.key = Some(key.to_string());
        self.dispatch(&[Target::Document], event);
    }

    /// Report that `node` is visible at `ratio` to its observers.
    pub fn intersect(&mut self, node: NodeId, ratio: f64) {
        let mut event = Self::event(EventKind::Intersect, Some(node));
        event.intersection_ratio = ratio;
        self.dispatch(&[Target::Node(node)], event);
    }

    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.window.scrolled_into_view = Some(node);
    }

    fn event(kind: EventKind, target: Option<NodeId>) -> Event {
        Event {
            kind,
            target,
            key: None,
            intersection_ratio: 0.0,
            listener: ListenerId(0),
        }
    }


    /// Timestamp of the current frame in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn request_animation_frame<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut Document, f64) + 'static,
    {
        self.frames.push(Box::new(callback));
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Run the callbacks queued before this frame at time `now`.
    pub fn advance_frame(&mut self, now: f64) {
        self.now = now;
        for callback in std::mem::take(&mut self.frames) {
            callback(&mut *self, now);
        }
    }


    /// Record that `unit` has set this document up; false if it already had.
    pub fn claim(&mut self, unit: &'static str) -> bool {
        self.claimed.insert(unit)
    }

    pub fn is_claimed(&self, unit: &str) -> bool {
        self.claimed.contains(unit)
    }
}
