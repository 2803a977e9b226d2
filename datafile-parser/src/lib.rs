//! # datafile-parser
//!
//! Reader and writer for indentation-structured data files.
//!
//! A data file is a list of lines. Every line that is not blank and not a
//! comment becomes a node holding the line's tokens, and a node is the child of
//! the nearest earlier line with less indentation. There are no delimiters and
//! no schema: what the tokens mean is up to the tool reading them.
//!
//! ```text
//! system Sol
//!     pos 0 0
//!     link "Alpha Centauri"
//!     # comments and blank lines are dropped
//!     trade Food 250
//! ```
//!
//! File Layout
//!
//! - [`node`]: node handles, token and numeric accessors, diagnostic traces
//! - [`file`]: the append-only tree that owns every node
//! - [`reading`]: line tokenizer and indentation driven tree builder
//! - [`loader`]: entry points for strings, bytes, paths and readers
//! - [`writing`]: serializes trees back to text with minimal quoting
//! - [`check`]: byte level sanity checks for data files
//! - [`testing`]: fluent assertions used by the test suites

pub mod check;
pub mod diagnostics;
pub mod file;
pub mod loader;
pub mod node;
pub mod reading;
pub mod testing;
pub mod writing;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use file::DataFile;
pub use loader::LoadError;
pub use node::{Children, Node, NodeId, NumericValue};
pub use writing::{quote_token, DataWriter, WriteToken, WriterOptions};
