use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::reactive::{Data, Dep, Value};
use crate::runtime::ReactiveRuntime;

/// Convert every own property of `data`, recursively, into a reactive slot.
///
/// Object-valued properties become nested [`Scope`]s so mutations deep in
/// the graph are tracked; primitive leaves are stored as-is. Each property
/// owns exactly one [`Dep`], created here and living as long as the slot.
pub fn observe(data: Data) -> Scope {
    let props = data
        .iter()
        .map(|(key, value)| (key.clone(), Property::new(Slot::observed(value.clone()))))
        .collect();

    Scope {
        inner: Arc::new(ScopeInner { props }),
    }
}

/// One reactive object: a fixed set of named properties, each with a value
/// slot and its own dependency set.
///
/// The property set is frozen at observation time: properties cannot be
/// added or removed afterwards, only reassigned.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    props: HashMap<String, Property>,
}

/// A reactive property: private value slot plus owned dependency set.
struct Property {
    slot: RwLock<Slot>,
    dep: Dep,
}

impl Property {
    fn new(slot: Slot) -> Self {
        Self {
            slot: RwLock::new(slot),
            dep: Dep::new(),
        }
    }
}

/// What a property slot currently holds.
enum Slot {
    /// A primitive leaf.
    Leaf(Value),
    /// An object observed at construction time: reads and writes of its own
    /// properties are tracked.
    Observed(Scope),
    /// An object assigned after observation. Stored raw: its interior is
    /// not reactive. Reassignment does not re-observe; a known limitation,
    /// kept to match the engine's first-pass-only observation model.
    Raw(Data),
}

impl Slot {
    /// Slot for a value seen during the initial observation pass.
    fn observed(value: Value) -> Self {
        match value {
            Value::Object(data) => Slot::Observed(observe(data)),
            leaf => Slot::Leaf(leaf),
        }
    }

    /// Slot for a value assigned through the write path.
    fn assigned(value: Value) -> Self {
        match value {
            Value::Object(data) => Slot::Raw(data),
            leaf => Slot::Leaf(leaf),
        }
    }

    /// Materialize the slot contents as a plain [`Value`].
    ///
    /// Snapshotting an observed object reads its slots without registering
    /// the active watcher on any descendant: reading an object-valued
    /// property depends on the property itself, not on its interior.
    fn snapshot(&self) -> Value {
        match self {
            Slot::Leaf(value) => value.clone(),
            Slot::Observed(scope) => Value::Object(scope.snapshot()),
            Slot::Raw(data) => Value::Object(data.clone()),
        }
    }
}

impl Scope {
    /// Resolve a property path, registering the active watcher into the
    /// dependency set of every property traversed.
    ///
    /// Returns `None` when the path does not resolve.
    pub(crate) fn resolve(&self, path: &[&str]) -> Option<Value> {
        let (head, rest) = path.split_first()?;
        let prop = self.inner.props.get(*head)?;

        if let Some(watcher) = ReactiveRuntime::current().active() {
            prop.dep.add_sub(watcher);
        }

        let slot = prop.slot.read().unwrap();
        if rest.is_empty() {
            return Some(slot.snapshot());
        }

        match &*slot {
            Slot::Observed(scope) => {
                let scope = scope.clone();
                drop(slot);
                scope.resolve(rest)
            }
            // Interior of a reassigned object: plain lookup, nothing to
            // register on.
            Slot::Raw(data) => resolve_plain(data, rest),
            Slot::Leaf(_) => None,
        }
    }

    /// Write a property path. Returns `true` when a notification fired.
    ///
    /// Equal values are a strict no-op: no mutation, no notification. The
    /// value lock is released before notifying so subscriber callbacks can
    /// read (or write) freely.
    pub(crate) fn write(&self, path: &[&str], value: Value) -> bool {
        let Some((head, rest)) = path.split_first() else {
            return false;
        };
        let Some(prop) = self.inner.props.get(*head) else {
            return false;
        };

        if rest.is_empty() {
            {
                let mut slot = prop.slot.write().unwrap();
                if slot.snapshot() == value {
                    return false;
                }
                *slot = Slot::assigned(value);
            }
            prop.dep.notify();
            return true;
        }

        let slot = prop.slot.read().unwrap();
        match &*slot {
            Slot::Observed(scope) => {
                let scope = scope.clone();
                drop(slot);
                scope.write(rest, value)
            }
            Slot::Raw(_) => {
                drop(slot);
                let mut slot = prop.slot.write().unwrap();
                if let Slot::Raw(data) = &mut *slot {
                    // Mutates the plain object silently: nothing observes
                    // the interior of a reassigned composite.
                    write_plain(data, rest, value)
                } else {
                    false
                }
            }
            Slot::Leaf(_) => false,
        }
    }

    /// Rebuild a plain [`Data`] view of this scope's current contents.
    pub(crate) fn snapshot(&self) -> Data {
        self.inner
            .props
            .iter()
            .map(|(key, prop)| (key.clone(), prop.slot.read().unwrap().snapshot()))
            .collect()
    }

    /// Registrations on one property's dependency set, for inspection.
    #[cfg(test)]
    pub(crate) fn sub_count(&self, key: &str) -> usize {
        self.inner
            .props
            .get(key)
            .map(|p| p.dep.sub_count())
            .unwrap_or(0)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("props", &self.inner.props.len())
            .finish()
    }
}

fn resolve_plain(data: &Data, path: &[&str]) -> Option<Value> {
    let (head, rest) = path.split_first()?;
    let value = data.get(head)?;
    if rest.is_empty() {
        return Some(value.clone());
    }
    match value {
        Value::Object(inner) => resolve_plain(inner, rest),
        _ => None,
    }
}

fn write_plain(data: &mut Data, path: &[&str], value: Value) -> bool {
    let Some((head, rest)) = path.split_first() else {
        return false;
    };
    if rest.is_empty() {
        if data.get(head) == Some(&value) {
            return false;
        }
        data.set(*head, value);
        return true;
    }
    match data.get_mut(head) {
        Some(Value::Object(inner)) => write_plain(inner, rest, value),
        _ => false,
    }
}
