//! Sink interface: the write targets binding callbacks update.
//!
//! Both sinks receive `Null` (the undefined-equivalent) as the empty
//! string; any other value is written literally.

use crate::reactive::Value;
use crate::tree::Node;

/// Write a resolved value into a text node's content.
pub fn update_text(node: &Node, value: &Value) {
    node.set_text(value.to_string());
}

/// Write a resolved value into a node's value slot.
pub fn update_value(node: &Node, value: &Value) {
    let value = match value {
        Value::Null => Value::Str(String::new()),
        other => other.clone(),
    };
    node.set_value(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_writes_empty_string() {
        let text = Node::text("old");
        update_text(&text, &Value::Null);
        assert_eq!(text.text_content().unwrap(), "");

        let input = Node::element("input");
        update_value(&input, &Value::Null);
        assert_eq!(input.value(), Value::from(""));
    }

    #[test]
    fn literal_values_pass_through() {
        let input = Node::element("input");
        update_value(&input, &Value::from(3));
        assert_eq!(input.value(), Value::from(3));
    }
}
