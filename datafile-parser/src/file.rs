//! The tree of a data file
//!
//! [`DataFile`] owns every node in a flat, append-only arena. Slot 0 is the
//! synthetic root: it has no tokens and its children are the top-level lines
//! of the file. Nodes are only ever appended; nothing is removed or moved, so a
//! [`NodeId`] stays valid and a node keeps its position among its siblings for
//! the lifetime of the file.
//!
//! Files come from the reader (see [`crate::loader`]) or are built by hand with
//! [`DataFile::append`] and [`DataFile::append_copy`] for output that does not
//! mirror an input tree.

use crate::diagnostics::Diagnostic;
use crate::node::{Children, Node, NodeData, NodeId};

#[derive(Debug, Clone)]
pub struct DataFile {
    nodes: Vec<NodeData>,
    diagnostics: Vec<Diagnostic>,
}

impl DataFile {
    /// An empty file holding only the root.
    pub fn new() -> Self {
        DataFile {
            nodes: vec![NodeData::default()],
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node::new(self, NodeId::ROOT)
    }

    /// Handle for `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` was not issued by this file.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.index() < self.nodes.len(), "unknown node id {:?}", id);
        Node::new(self, id)
    }

    /// Top-level nodes in file order.
    pub fn iter(&self) -> Children<'_> {
        self.root().children()
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes[NodeId::ROOT.index()].children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes at any depth, not counting the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Problems found while reading the file.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Append a new last child of `parent`.
    pub fn append<I, S>(&mut self, parent: NodeId, tokens: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        self.append_at_line(parent, tokens, 0)
    }

    /// Append a deep copy of `node`, which may belong to any file, as the last
    /// child of `parent`. Copies carry no line numbers.
    pub fn append_copy(&mut self, parent: NodeId, node: Node<'_>) -> NodeId {
        let copy = self.append_at_line(parent, node.tokens().to_vec(), 0);
        let mut pending = vec![(node, copy)];
        while let Some((source, target)) = pending.pop() {
            for child in source.children() {
                let id = self.append_at_line(target, child.tokens().to_vec(), 0);
                pending.push((child, id));
            }
        }
        copy
    }

    pub(crate) fn append_at_line(
        &mut self,
        parent: NodeId,
        tokens: Vec<String>,
        line: usize,
    ) -> NodeId {
        assert!(
            parent.index() < self.nodes.len(),
            "unknown parent id {:?}",
            parent
        );
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData {
            tokens,
            children: Vec::new(),
            parent: Some(parent),
            line,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl Default for DataFile {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DataFile {
    type Item = Node<'a>;
    type IntoIter = Children<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
