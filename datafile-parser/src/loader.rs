//! Loading data files
//!
//! Entry points that turn text, bytes, files and readers into a [`DataFile`].
//! All of them funnel into the same reader; they differ only in how the bytes
//! are obtained.
//!
//! - Parsing never fails. Problems inside the text become diagnostics on the
//!   returned file.
//! - Only I/O can fail. A missing or unreadable file is an error, not an empty
//!   tree.
//! - Input that is not valid UTF-8 is decoded lossily, with a warning.
//! - A final newline is appended when the input lacks one.
//!
//! # Example
//!
//! ```rust
//! use datafile_parser::DataFile;
//!
//! let file = DataFile::from_path("data/map.txt")?;
//! for node in &file {
//!     if node.size() >= 2 && node.token(0) == "system" {
//!         println!("{}", node.token(1));
//!     }
//! }
//! ```

use crate::file::DataFile;
use crate::reading::read_source;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Error that can occur when loading a data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file could not be opened or read
    Io { path: PathBuf, message: String },
    /// Reading from a stream failed
    Read(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => {
                write!(f, "cannot read {}: {}", path.display(), message)
            }
            LoadError::Read(message) => write!(f, "read error: {}", message),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Read(err.to_string())
    }
}

impl DataFile {
    /// Parse data file text.
    pub fn parse(source: &str) -> DataFile {
        let source = with_final_newline(source);
        read_source(&source)
    }

    /// Parse raw bytes, replacing invalid UTF-8 sequences.
    pub fn from_bytes(bytes: &[u8]) -> DataFile {
        let source = match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(err) => {
                log::warn!(
                    "input is not valid UTF-8 ({}); invalid sequences were replaced",
                    err
                );
                String::from_utf8_lossy(bytes)
            }
        };
        Self::parse(&source)
    }

    /// Read and parse the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DataFile, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| LoadError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let file = Self::from_bytes(&bytes);
        log::debug!(
            "loaded {}: {} bytes, {} nodes, {} diagnostics",
            path.display(),
            bytes.len(),
            file.node_count(),
            file.diagnostics().len()
        );
        Ok(file)
    }

    /// Read `reader` to its end and parse the result.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<DataFile, LoadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }
}

/// The reader relies on every line ending in a newline.
fn with_final_newline(source: &str) -> Cow<'_, str> {
    if source.is_empty() || source.ends_with('\n') {
        Cow::Borrowed(source)
    } else {
        let mut owned = String::with_capacity(source.len() + 1);
        owned.push_str(source);
        owned.push('\n');
        Cow::Owned(owned)
    }
}
