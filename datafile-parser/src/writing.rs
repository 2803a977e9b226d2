//! Writing data files
//!
//! [`DataWriter`] turns trees back into text. Indentation is rebuilt from
//! nesting depth (one indent unit per level, a tab by default), and each token
//! gets the lightest quoting that reads back as the same token:
//!
//! - bare when it has no whitespace and no quote characters, is not empty and
//!   does not start with `#`
//! - `"double quoted"` when it has no `"`
//! - `` `backticked` `` otherwise. A token with both kinds of quote cannot be
//!   written faithfully; the reader never produces one.
//!
//! Comments and the original whitespace are not part of the tree, so a parse
//! and write cycle keeps tokens and nesting but not layout.

pub mod numbers;

use crate::file::DataFile;
use crate::node::Node;
use std::borrow::Cow;

/// Default significant digits for floating point tokens.
pub const DEFAULT_PRECISION: usize = 8;

/// Quote `token` so that it reads back as exactly one token with this content.
pub fn quote_token(token: &str) -> Cow<'_, str> {
    let has_space = token.chars().any(|c| c <= ' ');
    let has_double = token.contains('"');
    let needs_quotes =
        token.is_empty() || has_space || has_double || token.contains('`') || token.starts_with('#');

    if !needs_quotes {
        Cow::Borrowed(token)
    } else if has_double {
        Cow::Owned(format!("`{}`", token))
    } else {
        Cow::Owned(format!("\"{}\"", token))
    }
}

/// Anything that can be written as a single token.
pub trait WriteToken {
    /// Token text before quoting. `precision` applies to floating point values.
    fn to_token(&self, precision: usize) -> Cow<'_, str>;
}

impl WriteToken for str {
    fn to_token(&self, _precision: usize) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl WriteToken for String {
    fn to_token(&self, _precision: usize) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl WriteToken for Cow<'_, str> {
    fn to_token(&self, _precision: usize) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: WriteToken + ?Sized> WriteToken for &T {
    fn to_token(&self, precision: usize) -> Cow<'_, str> {
        (**self).to_token(precision)
    }
}

impl WriteToken for f64 {
    fn to_token(&self, precision: usize) -> Cow<'_, str> {
        Cow::Owned(numbers::format_float(*self, precision))
    }
}

impl WriteToken for f32 {
    fn to_token(&self, precision: usize) -> Cow<'_, str> {
        Cow::Owned(numbers::format_float(f64::from(*self), precision))
    }
}

macro_rules! write_token_for_integers {
    ($($ty:ty),*) => {
        $(
            impl WriteToken for $ty {
                fn to_token(&self, _precision: usize) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

write_token_for_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Knobs for [`DataWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Added once per nesting level. Must be non-empty whitespace or the
    /// output will not read back with the same nesting.
    pub indent: String,
    /// Significant digits for floating point tokens.
    pub precision: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent: "\t".to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataWriter {
    options: WriterOptions,
    out: String,
    indent: String,
    depth: usize,
    at_line_start: bool,
}

impl DataWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        DataWriter {
            options,
            out: String::new(),
            indent: String::new(),
            depth: 0,
            at_line_start: true,
        }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Write `node` as one line, then its children one level deeper. A node
    /// without tokens, such as the root of a file, has no line of its own:
    /// its children are written at the current level.
    pub fn write_node(&mut self, node: Node<'_>) {
        if node.tokens().is_empty() {
            for child in node.children() {
                self.write_node(child);
            }
            return;
        }

        for token in node.tokens() {
            self.write_token(token);
        }
        self.end_line();

        if node.has_children() {
            self.begin_child();
            for child in node.children() {
                self.write_node(child);
            }
            self.end_child();
        }
    }

    /// Write every top-level node of `file`, optionally separated by blank lines.
    pub fn write_file(&mut self, file: &DataFile, separate: bool) {
        for (index, node) in file.iter().enumerate() {
            if separate && index > 0 {
                self.add_line_break();
            }
            self.write_node(node);
        }
    }

    /// Append one token to the current line.
    pub fn write_token<T: WriteToken + ?Sized>(&mut self, token: &T) {
        let text = token.to_token(self.options.precision);
        if self.at_line_start {
            self.out.push_str(&self.indent);
            self.at_line_start = false;
        } else {
            self.out.push(' ');
        }
        self.out.push_str(&quote_token(&text));
    }

    /// Write `tokens` as one complete line.
    pub fn write_line(&mut self, tokens: &[&dyn WriteToken]) {
        for token in tokens {
            self.write_token(*token);
        }
        self.end_line();
    }

    /// Finish the current line.
    pub fn end_line(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// Lines written from now on are one level deeper.
    pub fn begin_child(&mut self) {
        self.indent.push_str(&self.options.indent);
        self.depth += 1;
    }

    /// Undo the matching [`DataWriter::begin_child`].
    ///
    /// # Panics
    ///
    /// Panics when no level is open.
    pub fn end_child(&mut self) {
        assert!(
            self.depth > 0,
            "end_child called without a matching begin_child"
        );
        self.depth -= 1;
        let len = self.indent.len() - self.options.indent.len();
        self.indent.truncate(len);
    }

    /// Current nesting level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Insert an empty line. Indentation is unaffected.
    pub fn add_line_break(&mut self) {
        if !self.at_line_start {
            self.end_line();
        }
        self.out.push('\n');
    }

    /// Write `# text` on its own line at the current indentation.
    pub fn write_comment(&mut self, text: &str) {
        if !self.at_line_start {
            self.end_line();
        }
        self.out.push_str(&self.indent);
        self.out.push_str("# ");
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Materialize the accumulated output.
    pub fn into_string(self) -> String {
        log::debug!("materialized {} bytes of output", self.out.len());
        self.out
    }
}

impl Default for DataWriter {
    fn default() -> Self {
        Self::new()
    }
}
