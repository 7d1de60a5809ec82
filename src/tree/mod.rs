//! The markup node tree the engine binds against.
//!
//! Nodes are explicit tagged variants (element or text) with a typed
//! attribute list; directive attributes are classified once, when the
//! attribute is constructed, rather than re-sniffed on every pass. A small
//! event surface (`add_listener`/`dispatch`) stands in for the host event
//! system so two-way bindings are exercisable.

mod event;
mod node;

pub use event::Event;
pub use node::{Attribute, AttributeKind, DirectiveKind, Node, DIRECTIVE_PREFIX, EVENT_PREFIX};
