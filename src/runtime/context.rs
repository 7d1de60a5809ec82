use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::reactive::Watcher;

/// Reactive runtime coordinating watcher evaluation (thread-local stack with
/// a global fallback).
///
/// The runtime owns the single "currently evaluating watcher" slot. While a
/// watcher evaluates its expression, every reactive property it reads asks
/// the runtime who is reading and registers that watcher into its own
/// dependency set. No watcher ever declares its dependencies explicitly;
/// they are inferred from the reads the runtime observes.
///
/// # Examples
///
/// Using the default global runtime:
///
/// ```
/// use tether::{Data, Store};
///
/// let store = Store::new(Data::new().insert("count", 0));
/// assert_eq!(store.get("count"), 0.into());
/// ```
///
/// Using scoped runtimes for isolation:
///
/// ```
/// use tether::runtime::ReactiveRuntime;
/// use tether::{Data, Store, Watcher};
///
/// ReactiveRuntime::scope(|| {
///     let store = Store::new(Data::new().insert("count", 0));
///     let watcher = Watcher::new(&store, "count", |_, _, _| {});
///     assert_eq!(watcher.value(), 0.into());
/// });
/// // Runtime and all its state is dropped here
/// ```
pub struct ReactiveRuntime {
    next_id: AtomicUsize,
    active: Mutex<Option<Watcher>>,
}

// Thread-local stack for scoped runtimes
thread_local! {
    static RUNTIME_STACK: RefCell<Vec<Arc<ReactiveRuntime>>> = RefCell::new(vec![]);
}

impl ReactiveRuntime {
    /// Create a new isolated runtime.
    fn new() -> Arc<Self> {
        Arc::new(ReactiveRuntime {
            next_id: AtomicUsize::new(0),
            active: Mutex::new(None),
        })
    }

    /// Run a function with a fresh isolated runtime.
    ///
    /// Useful for testing or creating isolated evaluation contexts. The
    /// runtime is automatically popped when the function returns.
    pub fn scope<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let runtime = Self::new();
        Self::with_runtime(runtime, f)
    }

    /// Get or create the global runtime (fallback).
    ///
    /// This is used as the default runtime when no scoped runtime is active.
    pub fn global() -> Arc<Self> {
        use std::sync::OnceLock;
        static RUNTIME: OnceLock<Arc<ReactiveRuntime>> = OnceLock::new();
        Arc::clone(RUNTIME.get_or_init(Self::new))
    }

    /// Get the current reactive runtime (scoped or global fallback).
    pub fn current() -> Arc<Self> {
        RUNTIME_STACK.with(|stack| stack.borrow().last().cloned().unwrap_or_else(Self::global))
    }

    /// Run a function with a specific runtime as the current context.
    ///
    /// This pushes the runtime onto the thread-local stack for the duration
    /// of the function execution.
    pub fn with_runtime<F, R>(runtime: Arc<Self>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        RUNTIME_STACK.with(|stack| {
            stack.borrow_mut().push(runtime);
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        RUNTIME_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    /// Generate the next unique ID for a watcher.
    pub fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// The watcher currently evaluating, if any.
    ///
    /// Reactive property reads call this to attribute the read. Outside an
    /// evaluation the slot is empty and reads register nothing.
    pub fn active(&self) -> Option<Watcher> {
        self.active.lock().unwrap().clone()
    }

    /// Evaluate `f` with `watcher` occupying the active slot.
    ///
    /// The previous occupant is saved and restored when `f` returns, so a
    /// nested evaluation leaves the outer frame attributed to itself again.
    /// Restoration happens in a drop guard: the slot is never left stale,
    /// even if `f` unwinds.
    pub fn evaluate<F, R>(&self, watcher: Watcher, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let prev = self.active.lock().unwrap().replace(watcher);
        let _restore = ActiveGuard { runtime: self, prev };
        f()
    }
}

/// Restores the previous active watcher when an evaluation frame ends.
struct ActiveGuard<'a> {
    runtime: &'a ReactiveRuntime,
    prev: Option<Watcher>,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        *self.runtime.active.lock().unwrap() = self.prev.take();
    }
}
