//! Non-fatal problems found while reading a file or interpreting its tokens.
//!
//! Nothing in this crate aborts on bad input text. Problems are described by a
//! [`Diagnostic`], which carries the trace of the offending node so the user can
//! find the spot in the file.

use crate::node::Node;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A quoted token ran to the end of its line.
    UnterminatedQuote,
    /// A token read as a number had trailing garbage or no digits at all.
    MalformedNumber { token: String },
}

impl DiagnosticKind {
    pub fn message(&self) -> String {
        match self {
            DiagnosticKind::UnterminatedQuote => "Closing quotation mark is missing:".to_string(),
            DiagnosticKind::MalformedNumber { token } => {
                format!("Cannot convert value \"{}\" to a number:", token)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based source line of the node, 0 for constructed nodes.
    pub line: usize,
    pub trace: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, node: Node<'_>) -> Self {
        Diagnostic {
            kind,
            line: node.line(),
            trace: node.trace(),
        }
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())?;
        if !self.trace.is_empty() {
            write!(f, "\n{}", self.trace)?;
        }
        Ok(())
    }
}
