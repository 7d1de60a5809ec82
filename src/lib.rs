//! # Tether
//!
//! A minimal reactive data-binding engine for Rust.
//!
//! Tether keeps rendered output synchronized with data mutations without
//! the caller issuing explicit re-render calls. Dependencies are never
//! declared; they are discovered implicitly by observing which reactive
//! properties a binding reads while it evaluates.
//!
//! ## Reactive store (data side)
//!
//! A plain [`Data`] object is observed once, recursively, into a [`Store`]:
//! - Every property becomes a reactive slot with its own dependency set
//! - Reads performed during a watcher evaluation register that watcher
//! - Writes notify the property's watchers, but only on actual change
//!
//! ## Bindings (markup side)
//!
//! A [`Node`] tree carrying `{{ name }}` interpolation markers and `v-`
//! directive attributes is compiled once by [`Compiler`]:
//! - `{{ name }}` text interpolation keeps text content current
//! - `v-model="name"` two-way binds an input's value slot
//! - `v-on:click="save"` wires an event to a [`MethodTable`] entry
//!
//! ## Putting it together
//!
//! ```
//! use tether::{App, AppOptions, Data, Node};
//!
//! let root = Node::element("div")
//!     .with_child(Node::element("p").with_child(Node::text("{{ name }}")));
//!
//! let app = App::new(
//!     AppOptions::new()
//!         .el(root.clone())
//!         .data(Data::new().insert("name", "x")),
//! );
//!
//! let text = root.children()[0].children()[0].clone();
//! assert_eq!(text.text_content().unwrap(), "x");
//!
//! app.set("name", "y");
//! assert_eq!(text.text_content().unwrap(), "y");
//! ```

pub mod app;
pub mod compile;
pub mod reactive;
pub mod runtime;
pub mod tree;

// Re-export main types for convenience
pub use app::{App, AppOptions};
pub use compile::{Compiler, Method, MethodTable};
pub use reactive::{Data, Dep, Store, Value, Watcher};
pub use tree::{Attribute, AttributeKind, DirectiveKind, Event, Node};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let store = Store::new(Data::new().insert("count", 0));
        assert_eq!(store.get("count"), Value::from(0));
        store.set("count", 42);
        assert_eq!(store.get("count"), Value::from(42));
    }
}
