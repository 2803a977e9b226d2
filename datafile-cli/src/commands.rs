//! Subcommand implementations
//!
//! Each command works on whole files: load, inspect or rewrite, print.

use clap::ValueEnum;
use datafile_config::{CheckConfig, WriterConfig};
use datafile_parser::check::{check_bytes, CheckIssue};
use datafile_parser::{quote_token, DataFile, DataWriter, LoadError, Node};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Output formats for `dump`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Indented token lists with line numbers
    Tree,
    /// Nested objects with line, tokens and children
    Json,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn load(path: &Path) -> Result<DataFile, LoadError> {
    if is_stdin(path) {
        DataFile::from_reader(io::stdin().lock())
    } else {
        DataFile::from_path(path)
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, String> {
    if is_stdin(path) {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(|e| format!("cannot read standard input: {}", e))?;
        Ok(bytes)
    } else {
        fs::read(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
    }
}

/// Serialize `file` with the configured writer settings.
pub fn render(file: &DataFile, config: &WriterConfig) -> Result<String, String> {
    let options = config.options().map_err(|e| e.to_string())?;
    let mut out = DataWriter::with_options(options);
    out.write_file(file, config.blank_line_between_roots);
    Ok(out.into_string())
}

pub fn format(paths: &[impl AsRef<Path>], in_place: bool, config: &WriterConfig) -> Result<(), String> {
    for path in paths {
        let path = path.as_ref();
        if in_place && is_stdin(path) {
            return Err("cannot format standard input in place".to_string());
        }

        let file = load(path).map_err(|e| e.to_string())?;
        let output = render(&file, config)?;
        if in_place {
            fs::write(path, &output)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            log::info!("formatted {}", path.display());
        } else {
            print!("{}", output);
        }
    }
    Ok(())
}

/// Print every problem found and return how many there were. A path that
/// cannot be read counts as one problem and the remaining paths are still
/// checked.
pub fn check(paths: &[impl AsRef<Path>], config: &CheckConfig) -> usize {
    let mut count = 0;
    for path in paths {
        let path = path.as_ref();
        let bytes = match read_bytes(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: {}", e);
                count += 1;
                continue;
            }
        };

        for issue in check_bytes(&bytes) {
            match issue {
                CheckIssue::InvalidCharacter { .. } => println!("{}:{}", path.display(), issue),
                CheckIssue::MissingFinalNewline => println!("{}: {}", path.display(), issue),
            }
            count += 1;
        }

        if config.report_diagnostics {
            let file = DataFile::from_bytes(&bytes);
            for diagnostic in file.diagnostics() {
                println!("{}:{}: {}", path.display(), diagnostic.line, diagnostic);
                count += 1;
            }
        }
    }
    count
}

pub fn dump(path: &Path, format: DumpFormat) -> Result<String, String> {
    let file = load(path).map_err(|e| e.to_string())?;
    match format {
        DumpFormat::Tree => Ok(tree_listing(&file)),
        DumpFormat::Json => {
            let nodes: Vec<Node<'_>> = file.iter().collect();
            let mut json = serde_json::to_string_pretty(&nodes)
                .map_err(|e| format!("JSON serialization failed: {}", e))?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// One line per node: `L<line>: ` then two spaces per level and the tokens.
pub fn tree_listing(file: &DataFile) -> String {
    let mut out = String::new();
    let mut pending: Vec<(Node<'_>, usize)> = file.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = pending.pop() {
        let tokens: Vec<_> = node.tokens().iter().map(|t| quote_token(t)).collect();
        out.push_str(&format!(
            "L{}: {}{}\n",
            node.line(),
            "  ".repeat(depth),
            tokens.join(" ")
        ));
        pending.extend(node.children().rev().map(|child| (child, depth + 1)));
    }
    out
}
