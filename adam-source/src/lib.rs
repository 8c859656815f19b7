//! Source code representation and error management.

use std::ops::Range;

use thiserror::Error;

/// Represents source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Returns the byte offset at which `remaining` starts.
    /// `remaining` must be a suffix of `self.content` (which is what every parser returns).
    pub fn offset_of(&self, remaining: &str) -> usize {
        self.content.len().saturating_sub(remaining.len())
    }

    /// Creates a [`SyntaxError`] located at the start of `remaining`.
    pub fn syntax_error(&self, message: impl ToString, remaining: &str) -> SyntaxError {
        SyntaxError::new(message, self.offset_of(remaining), remaining)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Represents a syntax error (compile time error).
///
/// Parsing is all-or-nothing, so a syntax error only knows where the parser gave up:
/// the unconsumed remainder of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}: `{locus}`")]
pub struct SyntaxError {
    message: String,
    position: usize,
    /// First line of the unconsumed input.
    locus: String,
    /// Length of the unconsumed input in bytes.
    remaining_len: usize,
}

impl SyntaxError {
    /// Create a new syntax error with the specified `message`, byte `position` and unconsumed text.
    pub fn new(message: impl ToString, position: usize, remaining: &str) -> Self {
        Self {
            message: message.to_string(),
            position,
            locus: first_line(remaining).to_string(),
            remaining_len: remaining.len(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the first character that could not be parsed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The first line of the leftover input.
    pub fn locus(&self) -> &str {
        &self.locus
    }

    /// Byte range of the leftover input.
    pub fn span(&self) -> Range<usize> {
        self.position..self.position + self.remaining_len
    }
}

/// Returns the first non-blank line of `text`, trimmed. Empty leftover yields `""`.
fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}
