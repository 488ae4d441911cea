//! Delimiter markers and placeholder span scanning.
//!
//! A placeholder is the open marker, then one or more characters that do not
//! contain the close marker, then the close marker. Markers are matched
//! case-insensitively and may be longer than one character (`[[` / `]]`).
//!
//! ```text
//! "a {x} {} {{y}"
//!    ^^^            span 2..5   inner "x"
//!        ^^         empty inner: not a placeholder, resume after the `{`
//!           ^^^^    span 9..13  inner "{y" (open marker is stripped later)
//! ```

use crate::Range;
use crate::error::ConfigError;
use regex::Regex;

/// A placeholder found by [`Delimiters::find_spans`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Markers included.
    pub outer: Range,
    /// Text between the markers.
    pub inner: Range,
}

/// Compiled open/close markers.
#[derive(Debug, Clone)]
pub struct Delimiters {
    open: String,
    close: String,
    open_re: Regex,
    close_re: Regex,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{".to_string(),
            close: "}".to_string(),
            open_re: regex!(r"(?i)\{").clone(),
            close_re: regex!(r"(?i)\}").clone(),
        }
    }
}

impl Delimiters {
    pub fn new(open: &str, close: &str) -> Result<Self, ConfigError> {
        if open.is_empty() || close.is_empty() {
            return Err(ConfigError::EmptyDelimiter { open: open.to_string(), close: close.to_string() });
        }
        Ok(Self {
            open: open.to_string(),
            close: close.to_string(),
            open_re: marker_pattern(open)?,
            close_re: marker_pattern(close)?,
        })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Every placeholder in `template`, left to right.
    pub fn find_spans(&self, template: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut position = 0;

        while let Some(open) = self.open_re.find_at(template, position) {
            let inner_start = open.end();
            match self.close_re.find_at(template, inner_start) {
                Some(close) if close.start() > inner_start => {
                    spans.push(Span {
                        outer: Range { start: open.start(), end: close.end() },
                        inner: Range { start: inner_start, end: close.start() },
                    });
                    position = close.end();
                }
                // Empty inner content: retry one character after this open marker.
                Some(_) => position = next_char_boundary(template, open.start()),
                None => break,
            }
        }

        spans
    }

    /// Remove every occurrence of either marker from `part`.
    pub fn strip(&self, part: &str) -> String {
        let without_open = self.open_re.replace_all(part, "");
        self.close_re.replace_all(&without_open, "").into_owned()
    }
}

fn marker_pattern(marker: &str) -> Result<Regex, ConfigError> {
    Ok(Regex::new(&format!("(?i){}", regex::escape(marker)))?)
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    index + text[index..].chars().next().map_or(1, char::len_utf8)
}
