//! Text editing operations over plain strings
//!
//! Edits are expressed as char-offset [`Span`]s. A batch is applied highest
//! offset first, so spans earlier in the text still point at the right chars
//! after later spans have been removed.

use super::document::Span;
use thiserror::Error;

/// Replace the text covered by `span` with `replacement`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
}

impl TextEdit {
    pub fn delete(span: Span) -> Self {
        Self {
            span,
            replacement: String::new(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            span: Span::new(offset, offset),
            replacement: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("edit {start}..{end} is outside the text ({len} chars)")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("edits {0:?} and {1:?} overlap")]
    Overlap(Span, Span),
}

/// Sort edits by descending start, the order a batch is applied in
pub fn sort_descending(edits: &mut [TextEdit]) {
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start).then(b.span.end.cmp(&a.span.end)));
}

/// Check that every edit is inside the text and no two edits overlap
pub fn validate_batch(len: usize, edits: &[TextEdit]) -> Result<(), BatchError> {
    for edit in edits {
        if edit.span.start > edit.span.end || edit.span.end > len {
            return Err(BatchError::OutOfBounds {
                start: edit.span.start,
                end: edit.span.end,
                len,
            });
        }
    }

    let mut spans: Vec<Span> = edits.iter().map(|e| e.span).collect();
    spans.sort();
    for window in spans.windows(2) {
        if window[0].overlaps(&window[1]) || (window[0] == window[1]) {
            return Err(BatchError::Overlap(window[0], window[1]));
        }
    }
    Ok(())
}

/// Apply all edits at once. Nothing is changed if the batch is invalid.
pub fn apply_batch(text: &mut String, edits: &[TextEdit]) -> Result<(), BatchError> {
    let mut chars: Vec<char> = text.chars().collect();
    validate_batch(chars.len(), edits)?;

    let mut ordered = edits.to_vec();
    sort_descending(&mut ordered);
    for edit in &ordered {
        chars.splice(edit.span.start..edit.span.end, edit.replacement.chars());
    }

    *text = chars.into_iter().collect();
    Ok(())
}

/// Where an offset ends up after a batch of edits is applied
pub fn shift_offset(offset: usize, edits: &[TextEdit]) -> usize {
    let mut shifted = offset as isize;
    for edit in edits {
        let inserted = edit.replacement.chars().count() as isize;
        if edit.span.end <= offset {
            shifted += inserted - edit.span.len() as isize;
        } else if edit.span.start < offset {
            // inside a replaced span: land at the start of the replacement
            shifted -= (offset - edit.span.start) as isize;
        }
    }
    shifted.max(0) as usize
}
