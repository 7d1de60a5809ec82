use std::fmt;
use std::sync::{Arc, Mutex};

use crate::reactive::{Store, Value};
use crate::runtime::ReactiveRuntime;

type Callback = Box<dyn Fn(&Store, &Value, &Value) + Send + Sync>;

/// A live binding between one property path and one change callback.
///
/// Construction immediately evaluates the path inside the runtime's active
/// slot: the reactive properties read along the way register the watcher
/// into their dependency sets, and the resolved value is recorded as the
/// last-known value. From then on, each notification re-resolves the path
/// and invokes the callback (with the store as receiver, plus the new and
/// old values) only when the resolved value actually changed.
///
/// Watcher handles are cheap to clone and shared: dependency sets hold
/// clones of the same underlying binding.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use tether::{Data, Store, Watcher};
///
/// let store = Store::new(Data::new().insert("name", "x"));
/// let calls = Arc::new(AtomicUsize::new(0));
/// let calls_clone = Arc::clone(&calls);
///
/// let watcher = Watcher::new(&store, "name", move |_, _, _| {
///     calls_clone.fetch_add(1, Ordering::SeqCst);
/// });
/// assert_eq!(watcher.value(), "x".into());
///
/// store.set("name", "y");
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
///
/// // Writing the same value again notifies nobody.
/// store.set("name", "y");
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct Watcher {
    inner: Arc<WatcherInner>,
}

struct WatcherInner {
    id: usize,
    store: Store,
    expr: String,
    callback: Callback,
    value: Mutex<Value>,
}

impl Watcher {
    /// Bind `expr` on `store`, evaluating once to register dependencies.
    pub fn new<F>(store: &Store, expr: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Store, &Value, &Value) + Send + Sync + 'static,
    {
        let runtime = ReactiveRuntime::current();
        let watcher = Watcher {
            inner: Arc::new(WatcherInner {
                id: runtime.next_id(),
                store: store.clone(),
                expr: expr.into(),
                callback: Box::new(callback),
                value: Mutex::new(Value::Null),
            }),
        };

        // First evaluation runs inside the active slot so every reactive
        // read along the path registers this watcher.
        let initial = runtime.evaluate(watcher.clone(), || {
            watcher.inner.store.get(&watcher.inner.expr)
        });
        *watcher.inner.value.lock().unwrap() = initial;

        watcher
    }

    /// Re-evaluate after a notification.
    ///
    /// Plain read: the dependency link already exists, so no registration
    /// happens here. Fires the callback at most once, and never when the
    /// resolved value is unchanged.
    pub fn update(&self) {
        let value = self.inner.store.get(&self.inner.expr);
        let old = {
            let mut last = self.inner.value.lock().unwrap();
            if *last == value {
                return;
            }
            std::mem::replace(&mut *last, value.clone())
        };
        (self.inner.callback)(&self.inner.store, &value, &old);
    }

    /// The last-known resolved value.
    pub fn value(&self) -> Value {
        self.inner.value.lock().unwrap().clone()
    }

    /// The watched property path.
    pub fn expr(&self) -> &str {
        &self.inner.expr
    }

    /// The watcher's unique ID.
    pub fn id(&self) -> usize {
        self.inner.id
    }
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("id", &self.inner.id)
            .field("expr", &self.inner.expr)
            .field("value", &*self.inner.value.lock().unwrap())
            .finish()
    }
}
