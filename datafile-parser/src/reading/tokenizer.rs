//! Line tokenizer
//!
//! Each line is measured for indentation and the remainder is lexed with
//! [`logos`]. Every character up to and including the space is whitespace
//! (so the `\r` of a CRLF line is too), and each whitespace character counts as
//! one unit of indentation whatever its width.
//!
//! The first character of a token picks its class:
//!
//! - `"` or `` ` `` opens a quoted token that ends at the matching quote. Inside
//!   it whitespace and `#` are literal. If the line ends first, everything to
//!   the end of the line is the token and the line is flagged.
//! - `#` starts a comment that runs to the end of the line.
//! - anything else starts a bare token that runs until whitespace, so a `#` or
//!   quote after the first character belongs to the token.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[\x00-\x09\x0B-\x20]+")]
pub enum RawToken {
    #[regex(r#""[^"\n]*""#)]
    Quoted,

    #[regex(r#""[^"\n]*"#)]
    UnterminatedQuoted,

    #[regex(r"`[^`\n]*`")]
    Backticked,

    #[regex(r"`[^`\n]*")]
    UnterminatedBackticked,

    #[regex(r#"[^\x00-\x20#"`][^\x00-\x20]*"#)]
    Bare,

    #[regex(r"#[^\n]*")]
    Comment,
}

/// One meaningful line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub indent: usize,
    pub tokens: Vec<String>,
    /// The last token's closing quote is missing.
    pub unterminated: bool,
}

pub fn is_whitespace(c: char) -> bool {
    c <= ' ' && c != '\n'
}

/// Tokenize a single line (without its newline). Returns `None` for blank and
/// comment-only lines.
pub fn scan_line(line: &str) -> Option<ScannedLine> {
    let content = line.trim_start_matches(is_whitespace);
    let indent = line[..line.len() - content.len()].chars().count();

    let mut tokens = Vec::new();
    let mut unterminated = false;
    let mut lexer = RawToken::lexer(content);
    while let Some(token) = lexer.next() {
        let slice = lexer.slice();
        match token {
            Ok(RawToken::Quoted | RawToken::Backticked) => {
                tokens.push(slice[1..slice.len() - 1].to_string());
            }
            Ok(RawToken::UnterminatedQuoted | RawToken::UnterminatedBackticked) => {
                tokens.push(slice[1..].to_string());
                unterminated = true;
            }
            Ok(RawToken::Comment) => break,
            // Every character is covered by some pattern; keep the text if the
            // lexer ever disagrees.
            Ok(RawToken::Bare) | Err(()) => tokens.push(slice.to_string()),
        }
    }

    if tokens.is_empty() {
        return None;
    }
    Some(ScannedLine {
        indent,
        tokens,
        unterminated,
    })
}
