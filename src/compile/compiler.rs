use std::sync::{Mutex, OnceLock};

use regex::Regex;
use tracing::debug;

use crate::compile::methods::MethodTable;
use crate::compile::sink;
use crate::reactive::{Store, Watcher};
use crate::tree::{AttributeKind, DirectiveKind, Node};

/// Matches `{{ expression }}` interpolation markers in text content.
fn interpolation() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(.*)\}\}").unwrap())
}

fn extract_interpolation(text: &str) -> Option<String> {
    interpolation()
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Single-pass scanner that turns static markup into live bindings.
///
/// `compile` walks the tree once, in document order: element nodes get
/// their directive attributes processed and removed (directives are not
/// valid output markup), text nodes with `{{ expression }}` markers get an
/// immediate sink update plus a watcher that keeps the sink current.
///
/// The compiler owns every watcher it creates; bindings are permanent for
/// the lifetime of the compiled tree and there is no unsubscribe.
///
/// # Examples
///
/// ```
/// use tether::{Compiler, Data, MethodTable, Node, Store};
///
/// let store = Store::new(Data::new().insert("name", "x"));
/// let root = Node::element("div")
///     .with_child(Node::element("p").with_child(Node::text("{{ name }}")));
///
/// let mut compiler = Compiler::new(store.clone(), MethodTable::new());
/// compiler.compile(&root);
///
/// let text = root.children()[0].children()[0].clone();
/// assert_eq!(text.text_content().unwrap(), "x");
///
/// store.set("name", "y");
/// assert_eq!(text.text_content().unwrap(), "y");
/// ```
#[derive(Debug)]
pub struct Compiler {
    store: Store,
    methods: MethodTable,
    bindings: Vec<Watcher>,
}

impl Compiler {
    /// Create a compiler bound to a store and method table.
    pub fn new(store: Store, methods: MethodTable) -> Self {
        Self {
            store,
            methods,
            bindings: Vec::new(),
        }
    }

    /// Scan `root` and create bindings for every directive and
    /// interpolation found, at any depth.
    ///
    /// Children are detached into a fragment, processed there, and
    /// reattached once at the end, so structural work happens off the live
    /// tree.
    pub fn compile(&mut self, root: &Node) {
        let fragment = root.take_children();
        for child in &fragment {
            self.compile_node(child);
        }
        for child in fragment {
            root.append_child(child);
        }
    }

    fn compile_node(&mut self, node: &Node) {
        if node.is_element() {
            self.compile_directives(node);
        } else if let Some(content) = node.text_content() {
            if let Some(expr) = extract_interpolation(&content) {
                self.compile_text(node, &expr);
            }
        }

        // Attribute handling and recursion are independent concerns; an
        // element is compiled for its own directives and then descended
        // into regardless.
        for child in node.children() {
            self.compile_node(&child);
        }
    }

    fn compile_directives(&mut self, node: &Node) {
        for attr in node.attributes() {
            let AttributeKind::Directive(directive) = attr.kind() else {
                continue;
            };

            match directive {
                DirectiveKind::Event { event } => {
                    self.compile_event(node, event, attr.value());
                }
                DirectiveKind::Bind { .. } => {
                    self.compile_model(node, attr.value());
                }
            }

            node.remove_attribute(attr.name());
        }
    }

    /// Attach an event listener resolving to a named store method.
    fn compile_event(&self, node: &Node, event: &str, method_name: &str) {
        if event.is_empty() {
            debug!(method = method_name, "event directive without event name, skipped");
            return;
        }
        let Some(method) = self.methods.get(method_name) else {
            debug!(method = method_name, "event directive names no method, skipped");
            return;
        };

        let store = self.store.clone();
        node.add_listener(event, move |event| method(&store, event));
    }

    /// Two-way value binding: store-to-sink watcher plus input write-back.
    fn compile_model(&mut self, node: &Node, expr: &str) {
        let current = self.store.get(expr);
        sink::update_value(node, &current);

        let sink_node = node.clone();
        let watcher = Watcher::new(&self.store, expr, move |_, value, _| {
            sink::update_value(&sink_node, value);
        });
        self.bindings.push(watcher);

        // Write back on input events, skipping values equal to the last
        // push so sink updates do not loop back into the store.
        let store = self.store.clone();
        let expr = expr.to_string();
        let last = Mutex::new(current);
        node.add_listener("input", move |event| {
            let value = event.target().value();
            let mut last = last.lock().unwrap();
            if *last == value {
                return;
            }
            store.set(&expr, value.clone());
            *last = value;
        });
    }

    /// Text interpolation: one immediate sink update plus a watcher.
    fn compile_text(&mut self, node: &Node, expr: &str) {
        debug!(expr, "text binding");
        let initial = self.store.get(expr);
        sink::update_text(node, &initial);

        let sink_node = node.clone();
        let watcher = Watcher::new(&self.store, expr, move |_, value, _| {
            sink::update_text(&sink_node, value);
        });
        self.bindings.push(watcher);
    }

    /// Number of live bindings created so far.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Consume the compiler, keeping its bindings alive.
    pub fn into_bindings(self) -> Vec<Watcher> {
        self.bindings
    }
}
