//! Text objects for vim-like selection
//!
//! This module resolves delimited text objects (`i(`, `a"`, `2i{`, ...) around
//! a cursor offset. A resolved object has two flavors:
//! - "inner" (i) - the content strictly between the delimiters
//! - "around" (a) - the content including the delimiters
//!
//! Brackets are matched syntactically with a nesting depth counter. Quotes
//! cannot nest, so they are paired by proximity: the closest unescaped quote
//! before the cursor goes with the closest one at or after it, the second
//! closest with the second closest, and so on. Proximity pairing does not
//! check that the quotes in between are balanced, so an odd number of quotes
//! on one side of the cursor can produce a pair that spans two strings.

use super::document::{Document, Range, Span};
use super::pairs::{self, DelimiterPair};
use thiserror::Error;

/// Which part of a text object an operation acts on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Between the delimiters (`i`)
    Inner,
    /// Including the delimiters (`a`)
    Outer,
}

impl Scope {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Scope::Inner),
            'a' => Some(Scope::Outer),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Scope::Inner => 'i',
            Scope::Outer => 'a',
        }
    }
}

/// Why a text object could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid text object trigger '{0}'")]
    InvalidTrigger(char),
    #[error("no matching text object found")]
    NotFound,
}

/// A resolved text object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextObjectRange {
    /// Content between the delimiters
    pub inner: Range,
    /// Content including the delimiters
    pub outer: Range,
}

impl TextObjectRange {
    /// Build from the offsets of the opening and closing delimiter
    fn from_delimiters(doc: &Document, open: usize, close: usize) -> Self {
        Self {
            inner: doc.range_of(Span::new(open + 1, close)),
            outer: doc.range_of(Span::new(open, close + 1)),
        }
    }

    pub fn range(&self, scope: Scope) -> Range {
        match scope {
            Scope::Inner => self.inner,
            Scope::Outer => self.outer,
        }
    }
}

/// Tuning for the quote search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Documents longer than this (in chars) only search a window around the cursor
    pub quote_window_threshold: usize,
    /// Chars on each side of the cursor searched in large documents
    pub quote_window_radius: usize,
    /// A quote directly after this char is not a delimiter
    pub escape_char: char,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            quote_window_threshold: 100_000,
            quote_window_radius: 10_000,
            escape_char: '\\',
        }
    }
}

/// Resolves text objects against document snapshots
#[derive(Clone, Copy, Debug, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve the `count`-th text object for `trigger` around `offset`.
    ///
    /// A count of 0 is treated as 1.
    pub fn resolve(
        &self,
        doc: &Document,
        offset: usize,
        trigger: char,
        count: usize,
    ) -> Result<TextObjectRange, ResolveError> {
        let pair = pairs::pair_for(trigger).ok_or(ResolveError::InvalidTrigger(trigger))?;
        let count = count.max(1);
        let offset = offset.min(doc.len());

        let found = if pair.is_symmetric() {
            self.quote_pair(doc.chars(), offset, pair.open, count)
        } else {
            bracket_pair(doc.chars(), offset, pair, count)
        };

        match found {
            Some((open, close)) => {
                tracing::trace!(trigger = %trigger, count, open, close, "resolved text object");
                Ok(TextObjectRange::from_delimiters(doc, open, close))
            }
            None => {
                tracing::trace!(trigger = %trigger, count, offset, "no text object");
                Err(ResolveError::NotFound)
            }
        }
    }

    /// Pair quotes by proximity to the cursor
    fn quote_pair(
        &self,
        chars: &[char],
        offset: usize,
        quote: char,
        count: usize,
    ) -> Option<(usize, usize)> {
        let (lo, hi) = self.quote_window(chars.len(), offset);
        let escape = self.options.escape_char;

        let mut before = Vec::new();
        let mut after = Vec::new();
        for i in lo..hi {
            if chars[i] != quote || (i > 0 && chars[i - 1] == escape) {
                continue;
            }
            if i < offset {
                before.push(i);
            } else {
                after.push(i);
            }
        }

        before
            .iter()
            .rev()
            .zip(after.iter())
            .nth(count - 1)
            .map(|(open, close)| (*open, *close))
    }

    fn quote_window(&self, len: usize, offset: usize) -> (usize, usize) {
        if len <= self.options.quote_window_threshold {
            return (0, len);
        }
        let radius = self.options.quote_window_radius;
        (offset.saturating_sub(radius), offset.saturating_add(radius).min(len))
    }
}

/// Resolve with default options
pub fn resolve(
    doc: &Document,
    offset: usize,
    trigger: char,
    count: usize,
) -> Result<TextObjectRange, ResolveError> {
    Resolver::default().resolve(doc, offset, trigger, count)
}

/// Find the `count`-th enclosing bracket pair, or the nearest pair when the
/// cursor is not inside any and `count` is 1
fn bracket_pair(
    chars: &[char],
    offset: usize,
    pair: DelimiterPair,
    count: usize,
) -> Option<(usize, usize)> {
    let enclosing = scan_start(chars, offset, pair)
        .and_then(|start| enclosing_pair(chars, start, pair))
        .filter(|(open, close)| *open <= offset && offset <= *close);

    let mut found = match enclosing {
        Some(found) => found,
        None if count == 1 => return nearest_pair(chars, offset, pair),
        None => return None,
    };

    // Each step starts just before the previous opener, one level further out
    for _ in 1..count {
        let before = found.0.checked_sub(1)?;
        found = enclosing_pair(chars, before, pair)?;
    }
    Some(found)
}

/// Where the backward scan for the innermost enclosing pair begins.
///
/// A cursor resting on a closing delimiter belongs to that delimiter's pair,
/// so the scan starts just before it.
fn scan_start(chars: &[char], offset: usize, pair: DelimiterPair) -> Option<usize> {
    let last = chars.len().checked_sub(1)?;
    let start = offset.min(last);
    if chars[start] == pair.close {
        start.checked_sub(1)
    } else {
        Some(start)
    }
}

/// Scan backward from `from` (inclusive) for an unbalanced opener, then
/// forward for its matching closer
fn enclosing_pair(chars: &[char], from: usize, pair: DelimiterPair) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut open = None;

    for i in (0..=from).rev() {
        if chars[i] == pair.close {
            depth += 1;
        } else if chars[i] == pair.open {
            if depth == 0 {
                open = Some(i);
                break;
            }
            depth -= 1;
        }
    }

    let open = open?;
    matching_close(chars, open, pair).map(|close| (open, close))
}

fn matching_close(chars: &[char], open: usize, pair: DelimiterPair) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in chars.iter().enumerate().skip(open + 1) {
        if *c == pair.open {
            depth += 1;
        } else if *c == pair.close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// Among all top-level pairs, the one with a delimiter closest to `offset`.
/// A pair is top-level when no other matched pair encloses it, so stray
/// delimiters elsewhere do not hide it. Ties go to the earlier pair.
fn nearest_pair(chars: &[char], offset: usize, pair: DelimiterPair) -> Option<(usize, usize)> {
    let mut stack = Vec::new();
    let mut matched = Vec::new();

    for (i, c) in chars.iter().enumerate() {
        if *c == pair.open {
            stack.push(i);
        } else if *c == pair.close {
            if let Some(open) = stack.pop() {
                matched.push((open, i));
            }
        }
    }

    // Matched pairs nest properly, so a pair is enclosed exactly when an
    // earlier opener closes after it
    matched.sort_unstable();
    let mut outermost_close = None;
    let mut best: Option<(usize, (usize, usize))> = None;

    for (open, close) in matched {
        if outermost_close.is_some_and(|end| end > close) {
            continue;
        }
        outermost_close = Some(close);
        let distance = open.abs_diff(offset).min(close.abs_diff(offset));
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, (open, close)));
        }
    }

    best.map(|(_, found)| found)
}
