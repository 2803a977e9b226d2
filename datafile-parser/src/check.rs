//! Byte level checks for data files
//!
//! Data files are expected to be plain ASCII with Unix line endings and a final
//! newline. [`check_bytes`] reports the first offending byte (a control
//! character other than tab and newline, DEL, or any non-ASCII byte) and stops
//! looking, then reports a missing final newline.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckIssue {
    /// `line` and `column` are 1-based; columns count bytes.
    InvalidCharacter { line: usize, column: usize, byte: u8 },
    MissingFinalNewline,
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckIssue::InvalidCharacter { line, column, byte } => {
                write!(f, "{}:{}: Invalid character ({}).", line, column, byte)
            }
            CheckIssue::MissingFinalNewline => write!(f, "File does not end with a newline."),
        }
    }
}

pub fn check_bytes(data: &[u8]) -> Vec<CheckIssue> {
    let mut issues = Vec::new();

    let mut line = 1;
    let mut column = 1;
    for &byte in data {
        match byte {
            b'\n' => {
                line += 1;
                column = 1;
                continue;
            }
            b'\t' => {}
            byte if byte < b' ' || byte >= 0x7f => {
                issues.push(CheckIssue::InvalidCharacter { line, column, byte });
                break;
            }
            _ => {}
        }
        column += 1;
    }

    if data.last().is_some_and(|&last| last != b'\n') {
        issues.push(CheckIssue::MissingFinalNewline);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_file() {
        assert!(check_bytes(b"system Sol\n\tpos 0 0\n").is_empty());
        assert!(check_bytes(b"").is_empty());
    }

    #[test]
    fn test_carriage_return_is_reported_with_position() {
        let issues = check_bytes(b"a\n\tbc\r\n");
        assert_eq!(
            issues,
            vec![CheckIssue::InvalidCharacter {
                line: 2,
                column: 4,
                byte: b'\r'
            }]
        );
        assert_eq!(issues[0].to_string(), "2:4: Invalid character (13).");
    }

    #[test]
    fn test_only_first_invalid_character_is_reported() {
        let issues = check_bytes("caf\u{e9} \x01\n".as_bytes());
        assert_eq!(
            issues,
            vec![CheckIssue::InvalidCharacter {
                line: 1,
                column: 4,
                byte: 0xc3
            }]
        );
    }

    #[test]
    fn test_missing_final_newline() {
        let issues = check_bytes(b"a\nb");
        assert_eq!(issues, vec![CheckIssue::MissingFinalNewline]);
        assert_eq!(issues[0].to_string(), "File does not end with a newline.");
    }

    #[test]
    fn test_both_issues() {
        let issues = check_bytes(b"a\x7f");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1], CheckIssue::MissingFinalNewline);
    }
}
