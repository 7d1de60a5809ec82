use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::reactive::Value;
use crate::tree::event::{Event, Listener};

/// Marker prefix identifying directive attributes.
pub const DIRECTIVE_PREFIX: &str = "v-";

/// Sub-prefix (after the marker) denoting an event-binding directive.
pub const EVENT_PREFIX: &str = "on:";

/// A shared handle to one node of the markup tree.
///
/// Nodes are tagged variants (element or text) with interior mutability
/// for the pieces the binding engine writes: text content, input value,
/// attribute list, children and event listeners. Handles are cheap to clone
/// and all clones refer to the same node.
///
/// # Examples
///
/// ```
/// use tether::Node;
///
/// let root = Node::element("div")
///     .with_child(Node::element("p").with_child(Node::text("{{ name }}")))
///     .with_child(Node::element("input").with_attribute("v-model", "name"));
///
/// assert_eq!(root.children().len(), 2);
/// ```
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

struct NodeInner {
    kind: NodeKind,
}

enum NodeKind {
    Element {
        tag: String,
        attributes: Mutex<Vec<Attribute>>,
        children: Mutex<Vec<Node>>,
        value: Mutex<Value>,
        listeners: Mutex<HashMap<String, Vec<Listener>>>,
    },
    Text {
        content: Mutex<String>,
    },
}

impl Node {
    /// Create an element node with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                kind: NodeKind::Element {
                    tag: tag.into(),
                    attributes: Mutex::new(Vec::new()),
                    children: Mutex::new(Vec::new()),
                    value: Mutex::new(Value::Null),
                    listeners: Mutex::new(HashMap::new()),
                },
            }),
        }
    }

    /// Create a text node with the given content.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                kind: NodeKind::Text {
                    content: Mutex::new(content.into()),
                },
            }),
        }
    }

    /// Append an attribute, returning the node for chaining.
    ///
    /// The attribute is classified once here: a `v-` prefixed name becomes a
    /// directive, everything else stays static markup.
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let NodeKind::Element { attributes, .. } = &self.inner.kind {
            attributes
                .lock()
                .unwrap()
                .push(Attribute::new(name.into(), value.into()));
        }
        self
    }

    /// Append a child, returning the node for chaining.
    pub fn with_child(self, child: Node) -> Self {
        self.append_child(child);
        self
    }

    /// Whether this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.inner.kind, NodeKind::Element { .. })
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.inner.kind, NodeKind::Text { .. })
    }

    /// The element tag, if this is an element node.
    pub fn tag(&self) -> Option<String> {
        match &self.inner.kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text { .. } => None,
        }
    }

    /// The text content, if this is a text node.
    pub fn text_content(&self) -> Option<String> {
        match &self.inner.kind {
            NodeKind::Text { content } => Some(content.lock().unwrap().clone()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Replace the text content. No-op on element nodes.
    pub fn set_text(&self, text: impl Into<String>) {
        if let NodeKind::Text { content } = &self.inner.kind {
            *content.lock().unwrap() = text.into();
        }
    }

    /// The node's value slot (input-equivalent). `Null` on text nodes.
    pub fn value(&self) -> Value {
        match &self.inner.kind {
            NodeKind::Element { value, .. } => value.lock().unwrap().clone(),
            NodeKind::Text { .. } => Value::Null,
        }
    }

    /// Replace the node's value slot. No-op on text nodes.
    pub fn set_value(&self, value: impl Into<Value>) {
        if let NodeKind::Element { value: slot, .. } = &self.inner.kind {
            *slot.lock().unwrap() = value.into();
        }
    }

    /// Snapshot of the attribute list. Empty for text nodes.
    pub fn attributes(&self) -> Vec<Attribute> {
        match &self.inner.kind {
            NodeKind::Element { attributes, .. } => attributes.lock().unwrap().clone(),
            NodeKind::Text { .. } => Vec::new(),
        }
    }

    /// Remove an attribute by name.
    pub fn remove_attribute(&self, name: &str) {
        if let NodeKind::Element { attributes, .. } = &self.inner.kind {
            attributes.lock().unwrap().retain(|attr| attr.name() != name);
        }
    }

    /// Snapshot of the child list, in document order. Empty for text nodes.
    pub fn children(&self) -> Vec<Node> {
        match &self.inner.kind {
            NodeKind::Element { children, .. } => children.lock().unwrap().clone(),
            NodeKind::Text { .. } => Vec::new(),
        }
    }

    /// Append a child node. No-op on text nodes.
    pub fn append_child(&self, child: Node) {
        if let NodeKind::Element { children, .. } = &self.inner.kind {
            children.lock().unwrap().push(child);
        }
    }

    /// Detach and return all children, leaving the node empty.
    pub fn take_children(&self) -> Vec<Node> {
        match &self.inner.kind {
            NodeKind::Element { children, .. } => std::mem::take(&mut *children.lock().unwrap()),
            NodeKind::Text { .. } => Vec::new(),
        }
    }

    /// Attach a listener for the named event type. No-op on text nodes.
    pub fn add_listener<F>(&self, event_type: impl Into<String>, listener: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        if let NodeKind::Element { listeners, .. } = &self.inner.kind {
            listeners
                .lock()
                .unwrap()
                .entry(event_type.into())
                .or_default()
                .push(Arc::new(listener));
        }
    }

    /// Dispatch an event of the named type on this node.
    ///
    /// Listeners run synchronously in attachment order, outside the
    /// listener-table lock, so a handler is free to mutate the node or
    /// reenter the store's write path.
    pub fn dispatch(&self, event_type: &str) {
        let listeners = match &self.inner.kind {
            NodeKind::Element { listeners, .. } => listeners
                .lock()
                .unwrap()
                .get(event_type)
                .cloned()
                .unwrap_or_default(),
            NodeKind::Text { .. } => return,
        };

        let event = Event::new(event_type, self.clone());
        for listener in listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            NodeKind::Element { tag, children, .. } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("children", &children.lock().unwrap().len())
                .finish(),
            NodeKind::Text { content } => f
                .debug_struct("Text")
                .field("content", &*content.lock().unwrap())
                .finish(),
        }
    }
}

/// A typed markup attribute, classified once at construction.
#[derive(Clone, Debug)]
pub struct Attribute {
    name: String,
    value: String,
    kind: AttributeKind,
}

/// Whether an attribute is plain markup or a binding directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Ordinary markup attribute; the binding engine leaves it alone.
    Static,
    /// A `v-` prefixed directive.
    Directive(DirectiveKind),
}

/// The kind of binding a directive declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `v-on:<event>`: call a named method when the event fires.
    Event {
        /// Event type after the `on:` sub-prefix; may be empty, in which
        /// case the directive is ignored.
        event: String,
    },
    /// Any other directive name: a two-way value binding.
    Bind {
        /// Directive name after the marker (e.g. `model`).
        name: String,
    },
}

impl Attribute {
    /// Create an attribute, resolving its directive kind.
    pub fn new(name: String, value: String) -> Self {
        let kind = match name.strip_prefix(DIRECTIVE_PREFIX) {
            Some(directive) => match directive.strip_prefix(EVENT_PREFIX) {
                Some(event) => AttributeKind::Directive(DirectiveKind::Event {
                    event: event.to_string(),
                }),
                None => AttributeKind::Directive(DirectiveKind::Bind {
                    name: directive.to_string(),
                }),
            },
            None => AttributeKind::Static,
        };

        Self { name, value, kind }
    }

    /// The full attribute name as written in markup.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute value (the binding expression, for directives).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The resolved attribute kind.
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Whether this attribute is a directive.
    pub fn is_directive(&self) -> bool {
        matches!(self.kind, AttributeKind::Directive(_))
    }
}
