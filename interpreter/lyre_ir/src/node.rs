//! Generic parse-tree node.
//!
//! A `ParseNode` is the contract between a grammar engine and the reader:
//! a tree of `{tag, text, children}` nodes. Tags are matched by substring
//! on the consuming side (a leaf tagged `"number"` is a number literal, an
//! interior node tagged `"sexpr"` is an evaluable list, and so on), so a
//! front end is free to use compound tags like `"expr|number"`.

use std::fmt::Write as _;

/// A node in a generic parse tree.
///
/// Leaves carry their source text in `text`; interior nodes carry their
/// parsed sub-expressions in `children`. The root of a parse is an
/// interior node with an empty tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseNode {
    /// Node label, e.g. `"number"`, `"symbol"`, `"sexpr"`, `"qexpr"`.
    /// Empty for the unlabeled root.
    pub tag: String,
    /// Source text for leaves; empty for interior nodes.
    pub text: String,
    /// Sub-nodes in source order.
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// Create a leaf node carrying source text.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        ParseNode {
            tag: tag.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create an interior node with children.
    pub fn branch(tag: impl Into<String>, children: Vec<ParseNode>) -> Self {
        ParseNode {
            tag: tag.into(),
            text: String::new(),
            children,
        }
    }

    /// Create the unlabeled root node for a sequence of top-level
    /// expressions.
    pub fn root(children: Vec<ParseNode>) -> Self {
        Self::branch("", children)
    }

    /// Whether this node is the unlabeled root of a parse.
    pub fn is_root(&self) -> bool {
        self.tag.is_empty()
    }

    /// Render the tree in an indented one-node-per-line form for
    /// debugging and the CLI `parse` command.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        let tag = if self.is_root() { "<root>" } else { &self.tag };
        if self.children.is_empty() {
            let _ = writeln!(out, "{tag} {:?}", self.text);
        } else {
            let _ = writeln!(out, "{tag}");
            for child in &self.children {
                child.dump_into(out, depth + 1);
            }
        }
    }
}
