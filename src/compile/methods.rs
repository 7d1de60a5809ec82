use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::reactive::Store;
use crate::tree::Event;

/// A named handler invoked by event directives: receives the store as its
/// receiver and the dispatched event.
pub type Method = Arc<dyn Fn(&Store, &Event) + Send + Sync>;

/// Name-to-handler table consulted when event directives are compiled.
///
/// Lookup happens once, at directive-processing time; a directive whose
/// expression names no method is silently ignored.
///
/// # Examples
///
/// ```
/// use tether::MethodTable;
///
/// let methods = MethodTable::new().insert("save", |store, _event| {
///     store.set("saved", true);
/// });
/// assert!(methods.contains("save"));
/// ```
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: HashMap<String, Method>,
}

impl MethodTable {
    /// Create an empty method table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method under `name`, returning the table for chaining.
    pub fn insert<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Store, &Event) + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Look up a method by name.
    pub fn get(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }

    /// Whether a method with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
