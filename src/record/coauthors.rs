//! Coauthor cell parsing
//!
//! Coauthor cells arrive as a serialized list literal (`['Bob', "Carol"]`),
//! a structured list from a typed source, a plain scalar, or nothing at all.
//! The decoder below only understands quoted string and number literals
//! inside one pair of brackets. Nothing in a cell is ever evaluated.
//!
//! Parse order:
//! 1. Structured lists and well-formed list literals become their trimmed elements
//! 2. Anything else becomes a single-element list holding the trimmed raw text
//! 3. Missing or blank cells become an empty list

use super::cell::CellValue;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Why a coauthor cell could not be decoded as a list.
///
/// These never abort a build: the cell falls back to a single-element list
/// and the error is kept as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellParseError {
    #[error("malformed coauthor list: {0}")]
    Malformed(String),
    #[error("rejected executable-looking coauthor cell: {0}")]
    UnsafeRejected(String),
}

/// The decoded coauthor names of one cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoauthorCell {
    pub names: Vec<String>,
    /// Set when the cell had to fall back to its raw text
    pub anomaly: Option<CellParseError>,
}

impl CoauthorCell {
    fn clean(names: Vec<String>) -> Self {
        Self {
            names,
            anomaly: None,
        }
    }

    fn fallback(text: &str, anomaly: Option<CellParseError>) -> Self {
        Self {
            names: vec![text.to_string()],
            anomaly,
        }
    }
}

/// Parse a coauthor cell into an ordered list of names.
///
/// Total: every input produces a list. Duplicates are kept, blank elements
/// are dropped.
pub fn parse_coauthors(cell: Option<&CellValue>) -> CoauthorCell {
    let Some(cell) = cell else {
        return CoauthorCell::default();
    };

    match cell {
        CellValue::Empty => CoauthorCell::default(),
        CellValue::List(items) => CoauthorCell::clean(
            items
                .iter()
                .filter_map(CellValue::as_scalar_text)
                .collect(),
        ),
        CellValue::Text(raw) => parse_text(raw),
        scalar => match scalar.as_scalar_text() {
            Some(text) => CoauthorCell::fallback(&text, None),
            None => CoauthorCell::default(),
        },
    }
}

fn parse_text(raw: &str) -> CoauthorCell {
    let text = raw.trim();
    if text.is_empty() {
        return CoauthorCell::default();
    }

    let bracketed = text.starts_with('[') || text.starts_with('(');
    if bracketed {
        match decode_list_literal(text) {
            Ok(names) => return CoauthorCell::clean(names),
            Err(err) => {
                let anomaly = if looks_executable(text) {
                    CellParseError::UnsafeRejected(text.to_string())
                } else {
                    err
                };
                return CoauthorCell::fallback(text, Some(anomaly));
            }
        }
    }

    if looks_executable(text) {
        return CoauthorCell::fallback(
            text,
            Some(CellParseError::UnsafeRejected(text.to_string())),
        );
    }

    // A plain scalar or delimited string is a single name
    CoauthorCell::fallback(text, None)
}

/// Heuristic for cell text written as code: dunder names, lambdas, or a
/// call directly attached to an identifier (`system(`).
fn looks_executable(text: &str) -> bool {
    if text.contains("__") {
        return true;
    }
    if text
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .any(|word| word == "lambda")
    {
        return true;
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(2)
        .any(|pair| (pair[0].is_alphanumeric() || pair[0] == '_') && pair[1] == '(')
}

/// Decode a bracketed list literal of quoted strings and numbers.
///
/// Accepts `[...]` or `(...)`, single or double quotes, backslash escapes
/// and a trailing comma. Elements are trimmed; blank elements are dropped.
pub fn decode_list_literal(text: &str) -> Result<Vec<String>, CellParseError> {
    LiteralDecoder::new(text).decode()
}

struct LiteralDecoder<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> LiteralDecoder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
        }
    }

    fn error(&self, reason: &str) -> CellParseError {
        CellParseError::Malformed(format!("{} in {:?}", reason, self.source))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn decode(mut self) -> Result<Vec<String>, CellParseError> {
        self.skip_whitespace();
        let close = match self.chars.next() {
            Some('[') => ']',
            Some('(') => ')',
            _ => return Err(self.error("expected an opening bracket")),
        };

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek().copied() {
                Some(c) if c == close => {
                    self.chars.next();
                    break;
                }
                Some('\'') | Some('"') => items.push(self.quoted()?),
                Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                    items.push(self.number()?)
                }
                Some(_) => return Err(self.error("unexpected token")),
                None => return Err(self.error("unterminated list")),
            }

            self.skip_whitespace();
            match self.chars.next() {
                Some(',') => continue,
                Some(c) if c == close => break,
                Some(_) => return Err(self.error("expected ',' between elements")),
                None => return Err(self.error("unterminated list")),
            }
        }

        self.skip_whitespace();
        if self.chars.next().is_some() {
            return Err(self.error("trailing content after list"));
        }

        Ok(items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect())
    }

    fn quoted(&mut self) -> Result<String, CellParseError> {
        let quote = match self.chars.next() {
            Some(q) => q,
            None => return Err(self.error("unterminated list")),
        };
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn number(&mut self) -> Result<String, CellParseError> {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_') {
                out.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if out.parse::<f64>().is_err() && out.replace('_', "").parse::<i64>().is_err() {
            return Err(self.error("invalid number literal"));
        }
        Ok(out)
    }
}
