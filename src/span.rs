//! Source location tracking for the conversion pipeline.
//!
//! [`SourceIndex`] splits the raw input into physical lines once and keeps a
//! prefix array of line-start offsets, so that a 1-based line plus a 0-based
//! column resolves to an absolute offset in O(1).
//!
//! Offsets and columns count Unicode scalar values, not bytes. The index also
//! records byte starts per line so that a [`Location`] can be turned back into
//! a zero-copy `&str` slice of the input.

use crate::ast::{Location, Position, Range};

// ---------------------------------------------------------------------------
// SourceIndex
// ---------------------------------------------------------------------------

/// Pre-computed line table for one input document.
///
/// Built once per conversion and read-only afterwards. Lines are split on
/// `\n` only; the terminator is stripped and accounts for exactly one
/// character between consecutive lines.
#[derive(Debug, Clone)]
pub struct SourceIndex<'a> {
    source: &'a str,
    /// Physical lines without their terminator, 0-based storage.
    lines: Vec<&'a str>,
    /// Character offset of the first character on each line.
    /// `chars[0]` is always `0`; one extra slot past the last line.
    chars: Vec<usize>,
    /// Byte offset of the first byte on each line.
    bytes: Vec<usize>,
}

impl<'a> SourceIndex<'a> {
    /// Build the line table from the source text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let lines: Vec<&'a str> = source.split('\n').collect();
        let mut chars = Vec::with_capacity(lines.len() + 1);
        let mut bytes = Vec::with_capacity(lines.len() + 1);
        chars.push(0);
        bytes.push(0);
        for line in &lines {
            chars.push(chars[chars.len() - 1] + line.chars().count() + 1);
            bytes.push(bytes[bytes.len() - 1] + line.len() + 1);
        }
        Self {
            source,
            lines,
            chars,
            bytes,
        }
    }

    /// The full source text this index was built from.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Number of physical lines (a trailing newline yields a final empty line).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The physical line with the given 1-based number, if it exists.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1).and_then(|i| self.lines.get(i).copied())
    }

    /// Absolute character offset of a position.
    #[must_use]
    pub fn position_to_index(&self, pos: Position) -> usize {
        self.chars[pos.line - 1] + pos.column
    }

    /// Absolute `[start, end]` character offsets of a location.
    #[must_use]
    pub fn location_to_range(&self, loc: &Location) -> Range {
        [
            self.position_to_index(loc.start),
            self.position_to_index(loc.end),
        ]
    }

    /// Byte offset of a position, or `None` if it lies outside its line.
    fn byte_offset(&self, pos: Position) -> Option<usize> {
        let line = self.line(pos.line)?;
        let within = char_to_byte(line, pos.column)?;
        Some(self.bytes[pos.line - 1] + within)
    }

    /// The source text covered by a location.
    ///
    /// Returns `None` when either end does not fall on a character of the
    /// indexed source or the end precedes the start.
    #[must_use]
    pub fn slice(&self, loc: &Location) -> Option<&'a str> {
        let start = self.byte_offset(loc.start)?;
        let end = self.byte_offset(loc.end)?;
        self.source.get(start..end)
    }
}

// ---------------------------------------------------------------------------
// Column helpers
// ---------------------------------------------------------------------------

/// Byte index of the `column`-th character of `line`.
///
/// `column == line.chars().count()` maps to `line.len()`.
#[must_use]
pub fn char_to_byte(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(column)
}

/// Character column of a byte index that lies on a char boundary of `line`.
#[must_use]
pub fn byte_to_char(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

/// Character column of the first occurrence of `needle` in `line` at or
/// after character column `from`.
#[must_use]
pub fn find_from(line: &str, needle: &str, from: usize) -> Option<usize> {
    let start = char_to_byte(line, from)?;
    line[start..]
        .find(needle)
        .map(|found| byte_to_char(line, start + found))
}
