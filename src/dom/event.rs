// Event types and the listener registry entries.
// Handlers are registered explicitly against an event kind and a target.

use std::rc::Rc;

use super::document::{Document, NodeId};

/// Kinds of events the page units react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    KeyDown,
    /// An observed element crossed into the viewport.
    Intersect,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Window,
    Document,
    Node(NodeId),
}

/// Identifier of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// An event delivered to a handler.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    /// Element the event originated on, if any.
    pub target: Option<NodeId>,
    /// Key name for key events (e.g. "Escape").
    pub key: Option<String>,
    /// Visible ratio for intersection events.
    pub intersection_ratio: f64,
    /// The listener currently handling this event.
    pub listener: ListenerId,
}

pub type Handler = Rc<dyn Fn(&mut Document, &Event)>;

pub(crate) struct Listener {
    pub id: ListenerId,
    pub target: Target,
    pub kind: EventKind,
    pub handler: Handler,
}
