use std::fmt;

use crate::reactive::observe::{observe, Scope};
use crate::reactive::{Data, Value};

/// Reactive state container: the public face of an observed data object.
///
/// Construction walks the data object once and converts every own property,
/// recursively, into a reactive slot. Reads performed while a watcher is
/// evaluating register that watcher; writes notify the property's watchers,
/// but only when the new value actually differs.
///
/// Properties are addressed by dotted path (`"user.name"`); a path that does
/// not resolve reads as [`Value::Null`] and ignores writes.
///
/// # Examples
///
/// ```
/// use tether::{Data, Store, Value};
///
/// let store = Store::new(Data::new().insert("name", "x"));
/// assert_eq!(store.get("name"), Value::from("x"));
///
/// store.set("name", "y");
/// assert_eq!(store.get("name"), Value::from("y"));
///
/// // Missing paths degrade to Null rather than failing.
/// assert_eq!(store.get("missing"), Value::Null);
/// ```
#[derive(Clone)]
pub struct Store {
    root: Scope,
}

impl Store {
    /// Observe `data` and wrap it in a store.
    pub fn new(data: Data) -> Self {
        Self {
            root: observe(data),
        }
    }

    /// Read the value at a dotted property path.
    ///
    /// When a watcher is currently evaluating, the read registers it into
    /// the dependency set of every property traversed. A path that does not
    /// resolve yields [`Value::Null`].
    pub fn get(&self, path: &str) -> Value {
        self.root
            .resolve(&split_path(path))
            .unwrap_or(Value::Null)
    }

    /// Write the value at a dotted property path.
    ///
    /// A write that compares equal to the current value is a strict no-op.
    /// Otherwise the slot is replaced and the property's watchers are
    /// notified synchronously, in registration order. Writes to paths that
    /// do not resolve are ignored.
    ///
    /// Assigning a composite value does not re-observe it: the interior of
    /// a reassigned object is not reactive.
    pub fn set(&self, path: &str, value: impl Into<Value>) {
        self.root.write(&split_path(path), value.into());
    }

    /// Rebuild a plain [`Data`] view of the current state.
    pub fn snapshot(&self) -> Data {
        self.root.snapshot()
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Scope {
        &self.root
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("root", &self.root).finish()
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_roundtrip() {
        let store = Store::new(Data::new().insert("name", "x").insert("count", 1));

        assert_eq!(store.get("name"), Value::from("x"));
        store.set("count", 2);
        assert_eq!(store.get("count"), Value::from(2));
    }

    #[test]
    fn missing_path_reads_null_and_ignores_writes() {
        let store = Store::new(Data::new().insert("name", "x"));

        assert_eq!(store.get("missing"), Value::Null);
        store.set("missing", "y");
        assert_eq!(store.get("missing"), Value::Null);
    }

    #[test]
    fn dotted_path_reaches_nested_properties() {
        let store = Store::new(
            Data::new().insert("user", Data::new().insert("name", "x")),
        );

        assert_eq!(store.get("user.name"), Value::from("x"));
        store.set("user.name", "y");
        assert_eq!(store.get("user.name"), Value::from("y"));
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let store = Store::new(Data::new().insert("a", 1).insert("b", 2));
        store.set("a", 3);

        let data = store.snapshot();
        assert_eq!(data.get("a"), Some(&Value::from(3)));
        assert_eq!(data.get("b"), Some(&Value::from(2)));
    }
}
