//! Cursor motions for moving cursors around a document
//!
//! All positions are **char offsets** into a [`Document`]. These are the plain
//! `h j k l w b e 0 $ g G` motions; moving a cursor with any of them cancels a
//! pending text object capture.

use super::document::{Document, Position};

/// Character class for vim word motions.
/// A "word" is a run of word chars (alphanumeric + underscore),
/// a run of punctuation, or whitespace.
#[derive(PartialEq, Eq)]
enum CharClass {
    Word,
    Punct,
    Whitespace,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// Last offset a normal-mode cursor may rest on
fn last_offset(doc: &Document) -> usize {
    doc.len().saturating_sub(1)
}

pub fn left(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_at(offset);
    if pos.column == 0 {
        offset
    } else {
        offset - 1
    }
}

pub fn right(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_at(offset);
    if pos.column + 1 < doc.line_len(pos.line) {
        offset + 1
    } else {
        offset
    }
}

/// Start of the current line
pub fn line_start(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_at(offset);
    doc.offset_of(Position::new(pos.line, 0))
}

/// Last character of the current line (or line start if empty)
pub fn line_end(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_at(offset);
    let len = doc.line_len(pos.line);
    doc.offset_of(Position::new(pos.line, len.saturating_sub(1)))
}

/// Move up one line, preserving column where the line is long enough
pub fn up(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_at(offset);
    if pos.line == 0 {
        return offset;
    }
    doc.offset_of(Position::new(pos.line - 1, pos.column))
}

/// Move down one line, preserving column where the line is long enough
pub fn down(doc: &Document, offset: usize) -> usize {
    let pos = doc.position_at(offset);
    if pos.line + 1 >= doc.line_count() {
        return offset;
    }
    doc.offset_of(Position::new(pos.line + 1, pos.column))
}

/// Move forward to the start of the next word (w motion)
pub fn word_forward(doc: &Document, offset: usize) -> usize {
    let chars = doc.chars();
    if chars.is_empty() {
        return 0;
    }
    let mut pos = offset.min(last_offset(doc));
    let cls = char_class(chars[pos]);

    if cls != CharClass::Whitespace {
        while pos < chars.len() && char_class(chars[pos]) == cls {
            pos += 1;
        }
    }
    while pos < chars.len() && char_class(chars[pos]) == CharClass::Whitespace {
        pos += 1;
    }

    pos.min(last_offset(doc))
}

/// Move backward to the start of the previous word (b motion)
pub fn word_backward(doc: &Document, offset: usize) -> usize {
    let chars = doc.chars();
    if chars.is_empty() {
        return 0;
    }
    let mut pos = offset.min(chars.len()).saturating_sub(1);

    while pos > 0 && char_class(chars[pos]) == CharClass::Whitespace {
        pos -= 1;
    }
    let cls = char_class(chars[pos]);
    while pos > 0 && char_class(chars[pos - 1]) == cls {
        pos -= 1;
    }

    pos
}

/// Move to the end of the current/next word (e motion)
pub fn word_end(doc: &Document, offset: usize) -> usize {
    let chars = doc.chars();
    if chars.is_empty() {
        return 0;
    }
    let mut pos = offset + 1;
    if pos >= chars.len() {
        return last_offset(doc);
    }

    while pos < chars.len() && char_class(chars[pos]) == CharClass::Whitespace {
        pos += 1;
    }
    if pos < chars.len() {
        let cls = char_class(chars[pos]);
        while pos + 1 < chars.len() && char_class(chars[pos + 1]) == cls {
            pos += 1;
        }
    }

    pos.min(last_offset(doc))
}

pub fn document_start() -> usize {
    0
}

pub fn document_end(doc: &Document) -> usize {
    last_offset(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_start_and_end() {
        let doc = Document::new("hello\nworld");
        assert_eq!(line_start(&doc, 3), 0);
        assert_eq!(line_start(&doc, 8), 6);
        assert_eq!(line_end(&doc, 0), 4);
        assert_eq!(line_end(&doc, 6), 10);
    }

    #[test]
    fn test_left_right_stay_on_line() {
        let doc = Document::new("ab\ncd");
        assert_eq!(left(&doc, 3), 3);
        assert_eq!(right(&doc, 1), 1);
        assert_eq!(right(&doc, 3), 4);
    }

    #[test]
    fn test_up_down_preserve_column() {
        let doc = Document::new("long line\nab\nanother");
        assert_eq!(down(&doc, 5), 12);
        assert_eq!(down(&doc, 12), 15);
        assert_eq!(up(&doc, 15), 12);
        assert_eq!(up(&doc, 2), 2);
    }

    #[test]
    fn test_word_motions_with_punctuation() {
        let doc = Document::new("call(a.b, c)");
        assert_eq!(word_forward(&doc, 0), 4);
        assert_eq!(word_forward(&doc, 4), 5);
        assert_eq!(word_end(&doc, 0), 3);
        assert_eq!(word_backward(&doc, 7), 6);
        assert_eq!(word_backward(&doc, 5), 4);
    }

    #[test]
    fn test_utf8_lines() {
        let doc = Document::new("café\nwörld");
        assert_eq!(line_start(&doc, 7), 5);
        assert_eq!(line_end(&doc, 0), 3);
        assert_eq!(document_end(&doc), 9);
    }
}
