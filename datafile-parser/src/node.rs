//! Nodes of a data file tree
//!
//! Every node lives in the arena of the [`DataFile`] that created it and is
//! addressed by a [`NodeId`]. A [`Node`] is a borrowed, `Copy` handle pairing
//! the file with an id; all accessors go through it.
//!
//! Tokens are positional: by convention token 0 is a keyword and token 1 a
//! name, but nothing here depends on that. Tokens can be read as text or as
//! numbers. Numeric reads are lenient: they return the value of the longest
//! numeric prefix, and report anything after it as a [`Diagnostic`].
//!
//! The parent link exists only so [`Node::trace`] can print where in the file a
//! node came from. Tree walks go downwards through [`Node::children`].

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::file::DataFile;
use crate::writing::quote_token;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::fmt::Write as _;

/// Index of a node inside its [`DataFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The synthetic root every file starts with.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node arena exceeds u32::MAX entries"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NodeData {
    pub(crate) tokens: Vec<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) line: usize,
}

/// Best-effort numeric reading of a token.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericValue {
    pub value: f64,
    pub diagnostic: Option<Diagnostic>,
}

impl NumericValue {
    /// True when the whole token was a well formed number.
    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }
}

#[derive(Clone, Copy)]
pub struct Node<'a> {
    file: &'a DataFile,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(file: &'a DataFile, id: NodeId) -> Self {
        Node { file, id }
    }

    fn data(&self) -> &'a NodeData {
        self.file.data(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Number of tokens on this node's line.
    pub fn size(&self) -> usize {
        self.data().tokens.len()
    }

    pub fn tokens(&self) -> &'a [String] {
        &self.data().tokens
    }

    /// Token at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.size()`. Check [`Node::size`] first, or use
    /// [`Node::get`].
    pub fn token(&self, index: usize) -> &'a str {
        let tokens = self.tokens();
        assert!(
            index < tokens.len(),
            "token index {} out of range for node with {} tokens",
            index,
            tokens.len()
        );
        &tokens[index]
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens().get(index).map(String::as_str)
    }

    /// Read token `index` as a number, keeping any formatting problem as a
    /// diagnostic instead of logging it.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.size()`.
    pub fn numeric(&self, index: usize) -> NumericValue {
        let token = self.token(index);
        let scan = scan_number(token);
        let diagnostic = if scan.is_complete(token) {
            None
        } else {
            Some(Diagnostic::new(
                DiagnosticKind::MalformedNumber {
                    token: token.to_string(),
                },
                *self,
            ))
        };
        NumericValue {
            value: scan.value,
            diagnostic,
        }
    }

    /// Read token `index` as a number. Formatting problems are logged and the
    /// value of the numeric prefix (or 0) is returned.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.size()`.
    pub fn value(&self, index: usize) -> f64 {
        let numeric = self.numeric(index);
        if let Some(diagnostic) = &numeric.diagnostic {
            log::warn!("{}", diagnostic);
        }
        numeric.value
    }

    /// Whether token `index` exists and is a complete, well formed number.
    pub fn is_number(&self, index: usize) -> bool {
        self.get(index)
            .is_some_and(|token| scan_number(token).is_complete(token))
    }

    pub fn children(&self) -> Children<'a> {
        Children {
            file: self.file,
            ids: self.data().children.iter(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    /// The enclosing node. Only meant for diagnostics.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| Node::new(self.file, id))
    }

    /// 1-based line the node was read from, 0 for constructed nodes.
    pub fn line(&self) -> usize {
        self.data().line
    }

    /// Nesting depth below the root: top-level nodes are at depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(node) = current {
            if node.is_root() {
                break;
            }
            depth += 1;
            current = node.parent();
        }
        depth
    }

    /// Render this node and its ancestors, outermost first, one per line.
    ///
    /// Each line is prefixed with `L<line>: ` when the line is known and is
    /// indented two spaces per level. Tokens are quoted the way the writer
    /// quotes them.
    pub fn trace(&self) -> String {
        let mut chain = Vec::new();
        let mut current = Some(*self);
        while let Some(node) = current {
            if !node.is_root() {
                chain.push(node);
            }
            current = node.parent();
        }
        chain.reverse();

        let mut out = String::new();
        for (depth, node) in chain.iter().enumerate() {
            if node.tokens().is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            if node.line() != 0 {
                let _ = write!(out, "L{}: ", node.line());
            }
            out.push_str(&" ".repeat(2 * depth));
            for (index, token) in node.tokens().iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                out.push_str(&quote_token(token));
            }
        }
        out
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("line", &self.line())
            .field("tokens", &self.tokens())
            .field("children", &self.children().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 3)?;
        state.serialize_field("line", &self.line())?;
        state.serialize_field("tokens", self.tokens())?;
        state.serialize_field("children", &self.children().collect::<Vec<_>>())?;
        state.end()
    }
}

/// Ordered iterator over the children of a node.
#[derive(Clone)]
pub struct Children<'a> {
    file: &'a DataFile,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| Node::new(self.file, *id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| Node::new(self.file, *id))
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Result of scanning the numeric prefix of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumberScan {
    pub(crate) value: f64,
    /// Bytes of the token that belong to the number.
    pub(crate) consumed: usize,
    pub(crate) has_digits: bool,
}

impl NumberScan {
    pub(crate) fn is_complete(&self, token: &str) -> bool {
        self.has_digits && self.consumed == token.len()
    }
}

/// Scan `[+-]? digits* ('.' digits*)? ([eE] [+-]? digits+)?` from the start of
/// `token`. The exponent is only taken when at least one digit follows it.
pub(crate) fn scan_number(token: &str) -> NumberScan {
    let bytes = token.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        pos += 1;
    }

    let integer_start = pos;
    pos += digits_from(pos);
    let integer = &token[integer_start..pos];

    let mut fraction = "";
    if bytes.get(pos) == Some(&b'.') {
        let start = pos + 1;
        let count = digits_from(start);
        fraction = &token[start..start + count];
        pos = start + count;
    }

    let has_digits = !integer.is_empty() || !fraction.is_empty();
    if !has_digits {
        return NumberScan {
            value: 0.0,
            consumed: pos,
            has_digits,
        };
    }

    let mut exponent = String::new();
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut start = pos + 1;
        let exponent_negative = bytes.get(start) == Some(&b'-');
        if matches!(bytes.get(start), Some(b'-' | b'+')) {
            start += 1;
        }
        let count = digits_from(start);
        if count > 0 {
            if exponent_negative {
                exponent.push('-');
            }
            exponent.push_str(&token[start..start + count]);
            pos = start + count;
        }
    }

    let normalized = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if integer.is_empty() { "0" } else { integer },
        if fraction.is_empty() { "0" } else { fraction },
        if exponent.is_empty() { "0" } else { &exponent },
    );
    NumberScan {
        value: normalized.parse().unwrap_or(0.0),
        consumed: pos,
        has_digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12.5", 12.5)]
    #[case("0", 0.0)]
    #[case("-300", -300.0)]
    #[case("+7", 7.0)]
    #[case(".25", 0.25)]
    #[case("3.", 3.0)]
    #[case("1e3", 1000.0)]
    #[case("2.5E-2", 0.025)]
    fn test_scan_well_formed_numbers(#[case] token: &str, #[case] expected: f64) {
        let scan = scan_number(token);
        assert_eq!(scan.value, expected);
        assert!(scan.is_complete(token), "{token} should be complete");
    }

    #[rstest]
    #[case("12x", 12.0, 2)]
    #[case("abc", 0.0, 0)]
    #[case("", 0.0, 0)]
    #[case("-", 0.0, 1)]
    #[case("4e", 4.0, 1)]
    #[case("1.5.2", 1.5, 3)]
    fn test_scan_malformed_numbers(
        #[case] token: &str,
        #[case] expected: f64,
        #[case] consumed: usize,
    ) {
        let scan = scan_number(token);
        assert_eq!(scan.value, expected);
        assert_eq!(scan.consumed, consumed);
        assert!(!scan.is_complete(token));
    }

    #[test]
    fn test_numeric_reports_malformed_token() {
        let file = DataFile::parse("pos 12x abc 12.5\n");
        let node = file.iter().next().unwrap();

        let clean = node.numeric(3);
        assert_eq!(clean.value, 12.5);
        assert!(clean.is_clean());

        let partial = node.numeric(1);
        assert_eq!(partial.value, 12.0);
        let diagnostic = partial.diagnostic.expect("12x is malformed");
        assert_eq!(
            diagnostic.kind,
            DiagnosticKind::MalformedNumber {
                token: "12x".to_string()
            }
        );
        assert_eq!(diagnostic.line, 1);

        let garbage = node.numeric(2);
        assert_eq!(garbage.value, 0.0);
        assert!(garbage.diagnostic.is_some());
    }

    #[test]
    fn test_value_returns_best_effort() {
        let file = DataFile::parse("pos -12.5 8q\n");
        let node = file.iter().next().unwrap();
        assert_eq!(node.value(1), -12.5);
        assert_eq!(node.value(2), 8.0);
    }

    #[test]
    fn test_is_number() {
        let file = DataFile::parse("trade Food 250 2x\n");
        let node = file.iter().next().unwrap();
        assert!(!node.is_number(0));
        assert!(node.is_number(2));
        assert!(!node.is_number(3));
        assert!(!node.is_number(9));
    }

    #[test]
    #[should_panic(expected = "token index 2 out of range")]
    fn test_token_out_of_range_panics() {
        let file = DataFile::parse("key value\n");
        let node = file.iter().next().unwrap();
        node.token(2);
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let file = DataFile::parse("key value\n");
        let node = file.iter().next().unwrap();
        assert_eq!(node.get(1), Some("value"));
        assert_eq!(node.get(2), None);
    }

    #[test]
    fn test_parent_and_depth() {
        let file = DataFile::parse("a\n\tb\n\t\tc\n");
        let a = file.iter().next().unwrap();
        let b = a.children().next().unwrap();
        let c = b.children().next().unwrap();

        assert_eq!(a.depth(), 0);
        assert_eq!(c.depth(), 2);
        assert_eq!(c.parent().unwrap().id(), b.id());
        assert!(a.parent().unwrap().is_root());
        assert!(file.root().parent().is_none());
    }

    #[test]
    fn test_trace_renders_ancestors_with_quoting() {
        let file = DataFile::parse("planet \"New Boston\"\n\tdescription `Say \"hi\"`\n");
        let planet = file.iter().next().unwrap();
        let description = planet.children().next().unwrap();

        assert_eq!(
            description.trace(),
            "L1: planet \"New Boston\"\nL2:   description `Say \"hi\"`"
        );
    }

    #[test]
    fn test_trace_of_constructed_node_has_no_line_numbers() {
        let mut file = DataFile::new();
        let outfit = file.append(NodeId::ROOT, ["outfit", "Blaster"]);
        let cost = file.append(outfit, ["cost", "abc"]);

        let node = file.node(cost);
        assert_eq!(node.trace(), "outfit Blaster\n  cost abc");
        assert_eq!(node.numeric(1).diagnostic.unwrap().line, 0);
    }

    #[test]
    fn test_children_iterator_is_exact_and_reversible() {
        let file = DataFile::parse("a\n\tb\n\tc\n\td\n");
        let a = file.iter().next().unwrap();

        assert_eq!(a.children().len(), 3);
        let reversed: Vec<_> = a.children().rev().map(|n| n.token(0)).collect();
        assert_eq!(reversed, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_serialize_as_nested_objects() {
        let file = DataFile::parse("a 1\n\tb\n");
        let json = serde_json::to_value(file.iter().next().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "line": 1,
                "tokens": ["a", "1"],
                "children": [{ "line": 2, "tokens": ["b"], "children": [] }]
            })
        );
    }
}
