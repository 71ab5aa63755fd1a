//! Splitting of scriptlet argument lists into their individual arguments.
//!
//! AdGuard argument lists are fully quoted, e.g. `('set-constant', 'ads', 'false')`, and are
//! read with a small state machine. uBlock Origin and Adblock Plus delimit arguments differently;
//! the helpers at the bottom of this module split those lists before they are requoted.

use memchr::memchr_iter;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static SENTENCE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*"|\S+"#).unwrap());

/// The rule text does not have the shape of the dialect it claims to be written in.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum SyntaxError {
    #[error("unexpected character {0:?} at byte {1} of argument list")]
    UnexpectedCharacter(char, usize),
    #[error("unterminated quoted argument")]
    UnterminatedQuote,
    #[error("argument list is not closed")]
    NotClosed,
    #[error("rule has no argument list")]
    MissingArguments,
    #[error("rule does not name a scriptlet")]
    MissingScriptletName,
    #[error("snippet rule has no statements")]
    EmptySnippet,
    #[error("invalid selector {0:?}")]
    InvalidSelector(String),
    #[error("argument {0:?} ends in a backslash")]
    TrailingBackslash(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between arguments.
    Opened,
    /// Inside a quoted argument.
    Param,
    /// The final `)` was consumed.
    Closed,
}

/// Parses a parenthesized, quoted argument list such as `('name', "arg 1", 'it\'s')`.
///
/// The first returned element is the scriptlet name. An escaped quote of the kind that opened
/// the argument is unescaped; anything else is kept as written.
pub fn tokenize_arguments(input: &str) -> Result<Vec<String>, SyntaxError> {
    let last_index = input.char_indices().last().map(|(i, _)| i);

    let mut state = State::Opened;
    let mut quote = '\'';
    let mut current = String::new();
    let mut arguments = vec![];

    for (i, c) in input.char_indices() {
        state = match state {
            State::Opened => match c {
                ' ' | '(' | ',' => State::Opened,
                '\'' | '"' => {
                    quote = c;
                    State::Param
                }
                ')' if Some(i) == last_index => State::Closed,
                ')' => State::Opened,
                _ => return Err(SyntaxError::UnexpectedCharacter(c, i)),
            },
            State::Param if c == quote => {
                if current.ends_with('\\') {
                    current.pop();
                    current.push(c);
                    State::Param
                } else {
                    arguments.push(std::mem::take(&mut current));
                    State::Opened
                }
            }
            State::Param => {
                current.push(c);
                State::Param
            }
            // Only reachable on the last character, so nothing can follow it
            State::Closed => return Err(SyntaxError::UnexpectedCharacter(c, i)),
        };
    }

    match state {
        State::Closed => Ok(arguments),
        State::Param => Err(SyntaxError::UnterminatedQuote),
        State::Opened => Err(SyntaxError::NotClosed),
    }
}

/// Splits `text` on every `delimiter` that is not preceded by a backslash. Pieces are trimmed,
/// and escaped delimiters inside them become literal delimiters.
///
/// `"one\, two, three"` split on `,` gives `["one, two", "three"]`.
pub fn split_by_unescaped(text: &str, delimiter: char) -> Vec<String> {
    let mut pieces = vec![];
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&delimiter) {
            current.push(delimiter);
            chars.next();
        } else if c == delimiter {
            pieces.push(current.trim().to_owned());
            current.clear();
        } else {
            current.push(c);
        }
    }
    pieces.push(current.trim().to_owned());

    pieces
}

/// Inverse of [`split_by_unescaped`] for a single piece.
pub fn escape_delimiter(piece: &str, delimiter: char) -> String {
    let mut escaped = String::with_capacity(piece.len());
    for c in piece.chars() {
        if c == delimiter {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Splits `text` on each `delimiter` that is followed by an even number of double quotes, i.e.
/// that sits outside of any double-quoted section.
pub fn split_outside_quotes(text: &str, delimiter: char) -> Vec<&str> {
    let mut quotes_after = memchr_iter(b'"', text.as_bytes()).count();
    let mut pieces = vec![];
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if c == '"' {
            quotes_after -= 1;
        } else if c == delimiter && quotes_after % 2 == 0 {
            pieces.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    pieces.push(&text[start..]);

    pieces
}

/// Splits an Adblock Plus snippet statement into its whitespace-separated words. Quoted words
/// are kept whole, quotes and escaped quotes included.
pub fn split_sentence(statement: &str) -> Vec<&str> {
    SENTENCE_TOKEN_RE
        .find_iter(statement)
        .map(|m| m.as_str())
        .collect()
}

/// Strips one pair of matching outer quotes, if present.
pub fn strip_outer_quotes(arg: &str) -> &str {
    let bytes = arg.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

/// Formats an argument for an AdGuard rule: `'arg'`, with inner single quotes, escaped or not,
/// turned into double quotes.
///
/// The result only tokenizes back if `arg` does not end in a backslash, see
/// [`check_quotable`].
pub fn wrap_in_single_quotes(arg: &str) -> String {
    format!(
        "'{}'",
        strip_outer_quotes(arg).replace("\\'", "'").replace('\'', "\"")
    )
}

/// Rejects an argument that [`wrap_in_single_quotes`] cannot quote losslessly: a trailing
/// backslash would escape the closing quote.
pub fn check_quotable(arg: &str) -> Result<(), SyntaxError> {
    if strip_outer_quotes(arg).ends_with('\\') {
        return Err(SyntaxError::TrailingBackslash(arg.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/tokenizer.rs"]
mod unit_tests;
