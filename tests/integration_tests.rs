//! Integration tests for Tether

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tether::runtime::ReactiveRuntime;
use tether::{App, AppOptions, Compiler, Data, MethodTable, Node, Store, Value, Watcher};

#[test]
fn changed_write_notifies_exactly_once_with_new_and_old() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("name", "x"));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let calls_clone = Arc::clone(&calls);
        let seen_clone = Arc::clone(&seen);
        let _watcher = Watcher::new(&store, "name", move |_, new, old| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            *seen_clone.lock().unwrap() = Some((new.clone(), old.clone()));
        });

        // Equal write: never invokes the callback.
        store.set("name", "x");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Different write: exactly once, with (new, old).
        store.set("name", "y");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *seen.lock().unwrap(),
            Some((Value::from("y"), Value::from("x")))
        );
    });
}

#[test]
fn initial_sink_update_reflects_compile_time_data() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("name", "x").insert("draft", "hello"));
        let text = Node::text("{{ name }}");
        let input = Node::element("input").with_attribute("v-model", "draft");
        let root = Node::element("div")
            .with_child(Node::element("p").with_child(text.clone()))
            .with_child(input.clone());

        let mut compiler = Compiler::new(store, MethodTable::new());
        compiler.compile(&root);

        assert_eq!(text.text_content().unwrap(), "x");
        assert_eq!(input.value(), Value::from("hello"));
    });
}

#[test]
fn update_without_intervening_write_is_idempotent() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("count", 0));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let watcher = Watcher::new(&store, "count", move |_, _, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set("count", 1);
        let after_write = calls.load(Ordering::SeqCst);

        watcher.update();
        watcher.update();

        assert_eq!(calls.load(Ordering::SeqCst), after_write);
    });
}

#[test]
fn watcher_is_never_notified_by_unrelated_properties() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("a", 1).insert("b", 1));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let _watcher = Watcher::new(&store, "a", move |_, _, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set("b", 2);
        store.set("b", 3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.set("a", 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    });
}

#[test]
fn two_way_binding_round_trip() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("draft", "before"));
        let input = Node::element("input").with_attribute("v-model", "draft");
        let root = Node::element("form").with_child(input.clone());

        let mut compiler = Compiler::new(store.clone(), MethodTable::new());
        compiler.compile(&root);

        // Sink to store: simulate the user typing.
        input.set_value("typed");
        input.dispatch("input");
        assert_eq!(store.get("draft"), Value::from("typed"));

        // Store to sink: an external write flows back into the input.
        store.set("draft", "external");
        assert_eq!(input.value(), Value::from("external"));
    });
}

#[test]
fn repeated_input_events_with_same_value_write_once() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("draft", ""));
        let input = Node::element("input").with_attribute("v-model", "draft");
        let root = Node::element("form").with_child(input.clone());

        let mut compiler = Compiler::new(store.clone(), MethodTable::new());
        compiler.compile(&root);

        let writes = Arc::new(AtomicUsize::new(0));
        let writes_clone = Arc::clone(&writes);
        let _watcher = Watcher::new(&store, "draft", move |_, _, _| {
            writes_clone.fetch_add(1, Ordering::SeqCst);
        });

        input.set_value("typed");
        input.dispatch("input");
        input.dispatch("input");

        assert_eq!(writes.load(Ordering::SeqCst), 1);
        assert_eq!(store.get("draft"), Value::from("typed"));
    });
}

#[test]
fn text_interpolation_scenario() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("name", "x"));
        let text = Node::text("{{name}}");
        let root = Node::element("div").with_child(Node::element("p").with_child(text.clone()));

        let mut compiler = Compiler::new(store.clone(), MethodTable::new());
        compiler.compile(&root);
        assert_eq!(text.text_content().unwrap(), "x");

        // Sink writes happen inside notifications; count them through a
        // watcher registered on the same property.
        let notifications = Arc::new(AtomicUsize::new(0));
        let notifications_clone = Arc::clone(&notifications);
        let _counter = Watcher::new(&store, "name", move |_, _, _| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set("name", "y");
        assert_eq!(text.text_content().unwrap(), "y");
        assert_eq!(notifications.load(Ordering::SeqCst), 1);

        // Writing the same value again produces no additional sink write.
        store.set("name", "y");
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
        assert_eq!(text.text_content().unwrap(), "y");
    });
}

#[test]
fn click_directive_dispatches_method_with_store_receiver() {
    ReactiveRuntime::scope(|| {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let methods = MethodTable::new().insert("save", move |store, _event| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            // Receiver is the reactive store itself.
            store.set("saved", true);
        });

        let store = Store::new(Data::new().insert("saved", false));
        let button = Node::element("button").with_attribute("v-on:click", "save");
        let root = Node::element("div").with_child(button.clone());

        let mut compiler = Compiler::new(store.clone(), methods);
        compiler.compile(&root);

        button.dispatch("click");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get("saved"), Value::from(true));
    });
}

#[test]
fn nested_properties_are_reactive() {
    ReactiveRuntime::scope(|| {
        let store = Store::new(Data::new().insert("user", Data::new().insert("name", "x")));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let watcher = Watcher::new(&store, "user.name", move |_, _, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set("user.name", "y");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(watcher.value(), Value::from("y"));
    });
}

#[test]
fn full_app_wiring() {
    ReactiveRuntime::scope(|| {
        let text = Node::text("{{ count }}");
        let button = Node::element("button").with_attribute("v-on:click", "increment");
        let root = Node::element("div")
            .with_child(Node::element("p").with_child(text.clone()))
            .with_child(button.clone());

        let methods = MethodTable::new().insert("increment", |store, _event| {
            let next = store.get("count").as_number().unwrap_or(0.0) + 1.0;
            store.set("count", next);
        });

        let app = App::new(
            AppOptions::new()
                .el(root)
                .data(Data::new().insert("count", 0))
                .methods(methods),
        );

        assert_eq!(text.text_content().unwrap(), "0");

        button.dispatch("click");
        button.dispatch("click");

        assert_eq!(app.get("count"), Value::from(2));
        assert_eq!(text.text_content().unwrap(), "2");
    });
}
