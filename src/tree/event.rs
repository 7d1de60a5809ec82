use std::fmt;
use std::sync::Arc;

use crate::reactive::Value;
use crate::tree::Node;

pub(crate) type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// An event delivered to node listeners.
///
/// Carries the event type and the target node; handlers read the target's
/// current value slot for input-style events.
#[derive(Clone)]
pub struct Event {
    event_type: String,
    target: Node,
}

impl Event {
    pub(crate) fn new(event_type: &str, target: Node) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
        }
    }

    /// The event type this event was dispatched as.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> &Node {
        &self.target
    }

    /// The target node's current value slot.
    pub fn value(&self) -> Value {
        self.target.value()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("target", &self.target)
            .finish()
    }
}
