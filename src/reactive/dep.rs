use std::fmt;
use std::sync::Mutex;

use crate::reactive::Watcher;

/// Per-property dependency set: the ordered registry of watchers interested
/// in one reactive property.
///
/// Registration appends unconditionally; the set does not deduplicate. A
/// watcher that reads the same property twice during one evaluation is
/// registered twice and will receive two `update()` calls per notification;
/// the watcher's own value-compare guard absorbs the redundancy. Kept loose
/// deliberately, matching the engine's single-evaluation registration model.
#[derive(Default)]
pub struct Dep {
    subs: Mutex<Vec<Watcher>>,
}

impl Dep {
    /// Create an empty dependency set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a watcher. Appends in arrival order, duplicates allowed.
    pub fn add_sub(&self, watcher: Watcher) {
        self.subs.lock().unwrap().push(watcher);
    }

    /// Notify every registered watcher, in registration order, synchronously.
    ///
    /// Iterates a snapshot of the list: a watcher registered during the
    /// cascade (e.g. by a callback creating new bindings) is not
    /// retroactively notified for the write that triggered this call.
    pub fn notify(&self) {
        let subs = self.subs.lock().unwrap().clone();
        for sub in subs {
            sub.update();
        }
    }

    /// Number of registrations (duplicates included).
    pub fn sub_count(&self) -> usize {
        self.subs.lock().unwrap().len()
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dep")
            .field("subs", &self.sub_count())
            .finish()
    }
}
