//! Fluent assertion API for data file trees
//!
//! ```rust
//! use datafile_parser::testing::assert_tree;
//!
//! let file = DataFile::parse("system Sol\n\tpos 0 0\n");
//! assert_tree(&file).item_count(1).item(0, |system| {
//!     system.tokens(&["system", "Sol"]).child(0, |pos| {
//!         pos.tokens(&["pos", "0", "0"]).leaf();
//!     });
//! });
//! ```

use crate::file::DataFile;
use crate::node::Node;

/// Create an assertion builder for a file
pub fn assert_tree(file: &DataFile) -> TreeAssertion<'_> {
    TreeAssertion { file }
}

pub struct TreeAssertion<'a> {
    file: &'a DataFile,
}

impl<'a> TreeAssertion<'a> {
    /// Assert the number of top-level nodes
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.file.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} top-level nodes, found {}: [{}]",
            expected,
            actual,
            summarize(self.file.iter())
        );
        self
    }

    /// Assert on a top-level node by index
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let node = self.file.iter().nth(index).unwrap_or_else(|| {
            panic!(
                "Item index {} out of bounds (file has {} top-level nodes)",
                index,
                self.file.len()
            )
        });
        assertion(NodeAssertion {
            node,
            context: format!("items[{}]", index),
        });
        self
    }

    pub fn diagnostic_count(self, expected: usize) -> Self {
        let diagnostics = self.file.diagnostics();
        assert_eq!(
            diagnostics.len(),
            expected,
            "Expected {} diagnostics, found {:?}",
            expected,
            diagnostics
        );
        self
    }
}

pub struct NodeAssertion<'a> {
    node: Node<'a>,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn tokens(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.node.tokens(),
            expected,
            "{}: tokens differ",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.node.children())
        );
        self
    }

    /// Assert the node has no children
    pub fn leaf(self) -> Self {
        self.child_count(0)
    }

    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.node.line(),
            expected,
            "{}: wrong source line",
            self.context
        );
        self
    }

    /// Assert on a child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let node = self.node.children().nth(index).unwrap_or_else(|| {
            panic!(
                "{}: child index {} out of bounds (node has {} children)",
                self.context,
                index,
                self.node.children().len()
            )
        });
        assertion(NodeAssertion {
            node,
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}

fn summarize<'a>(nodes: impl Iterator<Item = Node<'a>>) -> String {
    nodes
        .map(|node| node.tokens().join(" "))
        .collect::<Vec<_>>()
        .join(", ")
}
