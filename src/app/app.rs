use std::fmt;

use tracing::warn;

use crate::compile::{Compiler, MethodTable};
use crate::reactive::{Data, Store, Value, Watcher};
use crate::tree::Node;

type MountedHook = Box<dyn FnOnce(&App) + Send>;

/// Configuration for an [`App`]: mount target, data, methods and lifecycle
/// hook.
///
/// # Examples
///
/// ```
/// use tether::{App, AppOptions, Data, MethodTable, Node};
///
/// let root = Node::element("div")
///     .with_child(Node::element("p").with_child(Node::text("{{ name }}")));
///
/// let app = App::new(
///     AppOptions::new()
///         .el(root.clone())
///         .data(Data::new().insert("name", "x"))
///         .mounted(|app| app.set("name", "ready")),
/// );
///
/// let text = root.children()[0].children()[0].clone();
/// assert_eq!(text.text_content().unwrap(), "ready");
/// # drop(app);
/// ```
#[derive(Default)]
pub struct AppOptions {
    el: Option<Node>,
    data: Data,
    methods: MethodTable,
    mounted: Option<MountedHook>,
}

impl AppOptions {
    /// Start an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node tree to compile against.
    pub fn el(mut self, node: Node) -> Self {
        self.el = Some(node);
        self
    }

    /// The plain data object to observe.
    pub fn data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// The method table consulted by event directives.
    pub fn methods(mut self, methods: MethodTable) -> Self {
        self.methods = methods;
        self
    }

    /// Hook invoked once, after observation and compilation complete.
    pub fn mounted<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&App) + Send + 'static,
    {
        self.mounted = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for AppOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppOptions")
            .field("el", &self.el)
            .field("data", &self.data)
            .field("methods", &self.methods)
            .field("mounted", &self.mounted.is_some())
            .finish()
    }
}

/// The assembled binding engine: observed store, compiled tree, live
/// bindings.
///
/// Setup order follows the engine's lifecycle: observe the data, compile
/// the mount target, then invoke `mounted`. A missing mount target is
/// reported as a diagnostic and compilation is skipped; setup still
/// completes and the store remains usable.
pub struct App {
    store: Store,
    methods: MethodTable,
    bindings: Vec<Watcher>,
}

impl App {
    /// Wire up an app from its options.
    pub fn new(options: AppOptions) -> Self {
        let AppOptions {
            el,
            data,
            methods,
            mounted,
        } = options;

        let store = Store::new(data);

        let bindings = match el {
            Some(root) => {
                let mut compiler = Compiler::new(store.clone(), methods.clone());
                compiler.compile(&root);
                compiler.into_bindings()
            }
            None => {
                warn!("mount target missing, compilation skipped");
                Vec::new()
            }
        };

        let app = App {
            store,
            methods,
            bindings,
        };

        if let Some(mounted) = mounted {
            mounted(&app);
        }

        app
    }

    /// Read a store property (proxy for `store().get`).
    pub fn get(&self, path: &str) -> Value {
        self.store.get(path)
    }

    /// Write a store property (proxy for `store().set`).
    pub fn set(&self, path: &str, value: impl Into<Value>) {
        self.store.set(path, value);
    }

    /// The reactive store backing this app.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The method table event directives resolve against.
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Number of live bindings created during compilation.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("methods", &self.methods)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ReactiveRuntime;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn mounted_runs_once_after_compilation() {
        ReactiveRuntime::scope(|| {
            let calls = Arc::new(AtomicUsize::new(0));
            let calls_clone = Arc::clone(&calls);

            let text = Node::text("{{ name }}");
            let root = Node::element("div").with_child(text.clone());

            let _app = App::new(
                AppOptions::new()
                    .el(root)
                    .data(Data::new().insert("name", "x"))
                    .mounted(move |app| {
                        calls_clone.fetch_add(1, Ordering::SeqCst);
                        // Compilation already happened when the hook runs.
                        assert_eq!(app.binding_count(), 1);
                    }),
            );

            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(text.text_content().unwrap(), "x");
        });
    }

    #[test]
    fn missing_mount_target_skips_compilation() {
        ReactiveRuntime::scope(|| {
            let app = App::new(
                AppOptions::new()
                    .data(Data::new().insert("name", "x"))
                    .mounted(|app| app.set("name", "y")),
            );

            // Setup proceeded: store works, mounted ran, no bindings exist.
            assert_eq!(app.get("name"), Value::from("y"));
            assert_eq!(app.binding_count(), 0);
        });
    }

    #[test]
    fn proxy_accessors_reach_the_store() {
        ReactiveRuntime::scope(|| {
            let app = App::new(AppOptions::new().data(Data::new().insert("count", 1)));

            app.set("count", 2);
            assert_eq!(app.store().get("count"), Value::from(2));
        });
    }
}
