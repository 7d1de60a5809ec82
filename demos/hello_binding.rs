//! Minimal text interpolation: a store write updates the rendered tree.

use tether::{App, AppOptions, Data, Node};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let text = Node::text("{{ greeting }}");
    let root = Node::element("div").with_child(Node::element("p").with_child(text.clone()));

    let app = App::new(
        AppOptions::new()
            .el(root)
            .data(Data::new().insert("greeting", "hello"))
            .mounted(|_| println!("mounted")),
    );

    println!("initial: {}", text.text_content().unwrap());

    app.set("greeting", "hello, tether");
    println!("after write: {}", text.text_content().unwrap());

    // Equal writes are absorbed before any notification fires.
    app.set("greeting", "hello, tether");
    println!("after equal write: {}", text.text_content().unwrap());
}
