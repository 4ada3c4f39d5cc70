//! Document snapshots and coordinates
//!
//! All offsets are **char indices** into the text, and all columns are char
//! columns within a line. A [`Document`] is an immutable snapshot: it owns its
//! characters and a line index, so resolving text objects never observes a
//! buffer that changes underneath it.

use std::fmt;

/// A (line, column) coordinate, both 0-based
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open range between two positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `other` lies entirely within this range
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A half-open range of char offsets
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Immutable text snapshot with offset/position conversion
#[derive(Clone, Debug)]
pub struct Document {
    chars: Vec<char>,
    /// Char offset where each line begins; always starts with 0
    line_starts: Vec<usize>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        line_starts.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { chars, line_starts }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of chars in the document
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of a line in chars, excluding its newline
    pub fn line_len(&self, line: usize) -> usize {
        let Some(&start) = self.line_starts.get(line) else {
            return 0;
        };
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.chars.len());
        end - start
    }

    /// Convert a char offset to a position. Offsets past the end clamp to the end.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.chars.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line, offset - self.line_starts[line])
    }

    /// Convert a position to a char offset. Columns past the end of the line
    /// clamp to the line end, lines past the end clamp to the document end.
    pub fn offset_of(&self, position: Position) -> usize {
        match self.line_starts.get(position.line) {
            Some(&start) => start + position.column.min(self.line_len(position.line)),
            None => self.chars.len(),
        }
    }

    pub fn range_of(&self, span: Span) -> Range {
        Range::new(self.position_at(span.start), self.position_at(span.end))
    }

    pub fn span_of(&self, range: Range) -> Span {
        Span::new(self.offset_of(range.start), self.offset_of(range.end))
    }

    /// Text covered by a span
    pub fn slice(&self, span: Span) -> String {
        let end = span.end.min(self.chars.len());
        let start = span.start.min(end);
        self.chars[start..end].iter().collect()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
