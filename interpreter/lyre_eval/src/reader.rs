//! Lowering parse trees into value trees.

use lyre_ir::ParseNode;

use crate::error::RuntimeError;
use crate::value::Value;

/// Convert a generic parse node into a [`Value`].
///
/// Tags are matched by substring per the parse-tree contract: leaves
/// tagged `number`/`symbol` become atoms, interior nodes tagged
/// `sexpr`/`qexpr` (or the unlabeled root, which reads as a sexpr)
/// become lists. Punctuation children and placeholder leaves tagged
/// exactly `regex` carry no semantic value and are skipped, so trees
/// from front ends that keep their delimiters read identically.
pub fn read(node: &ParseNode) -> Value {
    if node.tag.contains("number") {
        return read_number(&node.text);
    }
    if node.tag.contains("symbol") {
        return Value::sym(node.text.clone());
    }

    let cells: Vec<Value> = node
        .children
        .iter()
        .filter(|child| !is_placeholder(child))
        .map(read)
        .collect();

    if node.tag.contains("qexpr") {
        Value::qexpr(cells)
    } else {
        Value::sexpr(cells)
    }
}

fn is_placeholder(node: &ParseNode) -> bool {
    matches!(node.text.as_str(), "(" | ")" | "{" | "}") || node.tag == "regex"
}

fn read_number(text: &str) -> Value {
    match text.parse::<i64>() {
        Ok(n) => Value::num(n),
        Err(_) => Value::err(RuntimeError::InvalidNumber),
    }
}
