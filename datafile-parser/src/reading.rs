//! Reading data files
//!
//! Reading happens in one pass over the lines of the source:
//!
//! 1. [`tokenizer`] measures the line's indentation and splits the rest into
//!    tokens, dropping comments. Blank and comment-only lines produce nothing.
//! 2. [`tree_builder`] picks the parent of the new node from a stack of open
//!    nodes keyed by indentation.
//!
//! Unterminated quotes are reported as diagnostics on the file; reading itself
//! never fails.

pub mod tokenizer;
pub mod tree_builder;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::file::DataFile;
use tokenizer::scan_line;
use tree_builder::TreeBuilder;

/// Build the tree for `source`, which must end with a newline.
pub(crate) fn read_source(source: &str) -> DataFile {
    debug_assert!(source.is_empty() || source.ends_with('\n'));

    let mut file = DataFile::new();
    let mut builder = TreeBuilder::new();
    for (index, line) in source.split_terminator('\n').enumerate() {
        let Some(scanned) = scan_line(line) else {
            continue;
        };

        let parent = builder.parent_for(scanned.indent);
        let id = file.append_at_line(parent, scanned.tokens, index + 1);
        builder.open(id, scanned.indent);

        if scanned.unterminated {
            let diagnostic = Diagnostic::new(DiagnosticKind::UnterminatedQuote, file.node(id));
            log::warn!("{}", diagnostic);
            file.push_diagnostic(diagnostic);
        }
    }
    file
}
