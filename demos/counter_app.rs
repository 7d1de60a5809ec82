//! Counter with an event directive and a two-way bound input.

use tether::{App, AppOptions, Data, MethodTable, Node};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let count_text = Node::text("{{ count }}");
    let label_input = Node::element("input").with_attribute("v-model", "label");
    let button = Node::element("button").with_attribute("v-on:click", "increment");

    let root = Node::element("div")
        .with_child(Node::element("p").with_child(count_text.clone()))
        .with_child(label_input.clone())
        .with_child(button.clone());

    let methods = MethodTable::new().insert("increment", |store, _event| {
        let next = store.get("count").as_number().unwrap_or(0.0) + 1.0;
        store.set("count", next);
    });

    let app = App::new(
        AppOptions::new()
            .el(root)
            .data(Data::new().insert("count", 0).insert("label", "clicks"))
            .methods(methods),
    );

    println!("count: {}", count_text.text_content().unwrap());

    for _ in 0..3 {
        button.dispatch("click");
    }
    println!("after three clicks: {}", count_text.text_content().unwrap());

    // Simulate the user typing into the bound input.
    label_input.set_value("presses");
    label_input.dispatch("input");
    println!("label in store: {}", app.get("label"));

    // And push a store write back out to the input.
    app.set("label", "taps");
    println!("label in input: {}", label_input.value());
}
