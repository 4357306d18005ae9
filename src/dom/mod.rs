// Document model module.
// An in-process stand-in for the browser page the site units operate on.

pub mod document;
pub mod event;

pub use document::{Document, NodeId, Window};
pub use event::{Event, EventKind, ListenerId, Target};
