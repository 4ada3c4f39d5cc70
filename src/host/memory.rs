//! In-memory editing surface
//!
//! Backs the terminal UI and the tests: a single text buffer with any number
//! of cursors, undo history, transient highlights and an output log.

use super::{
    Clipboard, EditorHost, HighlightHandle, HighlightStyle, Selection, SurfaceSnapshot,
};
use crate::app::editor::operations::{self, TextEdit};
use crate::app::editor::{Document, Position, Range, Span};
use crate::app::UndoManager;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A live decoration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub ranges: Vec<Range>,
    pub style: HighlightStyle,
}

/// A message printed to the output log
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub message: String,
    pub reveal: bool,
}

#[derive(Default)]
struct Highlights {
    next_id: u64,
    live: FxHashMap<u64, Highlight>,
}

pub struct MemoryEditor {
    text: String,
    /// Primary cursor first; never empty while focused
    selections: Vec<Selection>,
    focused: bool,
    read_only: bool,
    clipboard: Box<dyn Clipboard>,
    highlights: Arc<Mutex<Highlights>>,
    output: Vec<OutputLine>,
    undo: UndoManager,
}

impl MemoryEditor {
    /// Create a focused editor with one cursor at the start.
    /// CRLF line endings are normalized to LF.
    pub fn new(text: &str, clipboard: impl Clipboard + 'static) -> Self {
        Self {
            text: text.replace("\r\n", "\n"),
            selections: vec![Selection::cursor(Position::default())],
            focused: true,
            read_only: false,
            clipboard: Box::new(clipboard),
            highlights: Arc::default(),
            output: Vec::new(),
            undo: UndoManager::new(1000),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn document(&self) -> Document {
        Document::new(&self.text)
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn primary(&self) -> Selection {
        self.selections
            .first()
            .copied()
            .unwrap_or_else(|| Selection::cursor(Position::default()))
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn last_output(&self) -> Option<&OutputLine> {
        self.output.last()
    }

    /// Decorations currently drawn
    pub fn highlights(&self) -> Vec<Highlight> {
        let highlights = self.highlights.lock();
        let mut ids: Vec<_> = highlights.live.keys().copied().collect();
        ids.sort_unstable();
        ids.iter().map(|id| highlights.live[id].clone()).collect()
    }

    /// Place cursors at the given char offsets, replacing all selections
    pub fn set_cursor_offsets(&mut self, offsets: &[usize]) {
        let doc = self.document();
        self.selections = offsets
            .iter()
            .map(|offset| Selection::cursor(doc.position_at(*offset)))
            .collect();
    }

    /// Char offsets of every cursor head
    pub fn cursor_offsets(&self) -> Vec<usize> {
        let doc = self.document();
        self.selections.iter().map(|s| doc.offset_of(s.head)).collect()
    }

    /// Move every cursor with a motion, collapsing selections
    pub fn move_cursors(&mut self, motion: impl Fn(&Document, usize) -> usize) {
        let doc = self.document();
        let mut moved: Vec<Selection> = Vec::with_capacity(self.selections.len());
        for sel in &self.selections {
            let next = Selection::cursor(doc.position_at(motion(&doc, doc.offset_of(sel.head))));
            if !moved.contains(&next) {
                moved.push(next);
            }
        }
        self.selections = moved;
    }

    /// Add a cursor one line below the last one
    pub fn add_cursor_below(&mut self) {
        let doc = self.document();
        let Some(last) = self.selections.last() else {
            return;
        };
        if last.head.line + 1 >= doc.line_count() {
            return;
        }
        let next = Position::new(last.head.line + 1, last.head.column);
        let below = doc.position_at(doc.offset_of(next));
        self.selections.push(Selection::cursor(below));
    }

    /// Keep only the primary cursor
    pub fn collapse_cursors(&mut self) {
        let primary = self.primary();
        self.selections = vec![Selection::cursor(primary.head)];
    }

    /// Insert text before every cursor
    pub fn insert_at_cursors(&mut self, text: &str) -> bool {
        let edits: Vec<TextEdit> = self
            .cursor_offsets()
            .into_iter()
            .map(|offset| TextEdit::insert(offset, text))
            .collect();
        self.apply_now(edits)
    }

    /// Delete the char before every cursor
    pub fn backspace(&mut self) -> bool {
        let edits: Vec<TextEdit> = self
            .cursor_offsets()
            .into_iter()
            .filter(|offset| *offset > 0)
            .map(|offset| TextEdit::delete(Span::new(offset - 1, offset)))
            .collect();
        if edits.is_empty() {
            return false;
        }
        self.apply_now(edits)
    }

    /// Insert the clipboard contents at every cursor
    pub fn paste(&mut self) -> Result<bool> {
        let text = self.clipboard.get_text()?;
        Ok(self.insert_at_cursors(&text))
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.undo(&self.text, &self.selections) {
            Some(state) => {
                self.text = state.text;
                self.selections = state.selections;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undo.redo(&self.text, &self.selections) {
            Some(state) => {
                self.text = state.text;
                self.selections = state.selections;
                true
            }
            None => false,
        }
    }

    /// Validate and apply a batch, then carry every cursor across it
    fn apply_now(&mut self, edits: Vec<TextEdit>) -> bool {
        if self.read_only {
            tracing::warn!(edits = edits.len(), "edit rejected: buffer is read-only");
            return false;
        }

        let old = self.document();
        let mut text = self.text.clone();
        if let Err(e) = operations::apply_batch(&mut text, &edits) {
            tracing::warn!(error = %e, "edit rejected");
            return false;
        }

        self.undo.save_state(&self.text, &self.selections);
        self.text = text;

        let new = self.document();
        let carry = |pos: Position| {
            let offset = operations::shift_offset(old.offset_of(pos), &edits);
            new.position_at(offset)
        };
        let mut carried: Vec<Selection> = Vec::with_capacity(self.selections.len());
        for sel in &self.selections {
            let next = Selection::new(carry(sel.anchor), carry(sel.head));
            if !carried.contains(&next) {
                carried.push(next);
            }
        }
        self.selections = carried;
        true
    }
}

#[async_trait]
impl EditorHost for MemoryEditor {
    fn snapshot(&self) -> Option<SurfaceSnapshot> {
        if !self.focused {
            return None;
        }
        Some(SurfaceSnapshot {
            document: self.document(),
            selections: self.selections.clone(),
        })
    }

    async fn apply_edits(&mut self, edits: Vec<TextEdit>) -> Result<bool> {
        Ok(self.apply_now(edits))
    }

    async fn write_clipboard(&mut self, text: String) -> Result<()> {
        self.clipboard.set_text(&text)
    }

    fn highlight(&mut self, ranges: Vec<Range>, style: HighlightStyle) -> HighlightHandle {
        let id = {
            let mut highlights = self.highlights.lock();
            let id = highlights.next_id;
            highlights.next_id += 1;
            highlights.live.insert(id, Highlight { ranges, style });
            id
        };

        let highlights = self.highlights.clone();
        HighlightHandle::new(move || {
            highlights.lock().live.remove(&id);
        })
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        if !selections.is_empty() {
            self.selections = selections;
        }
    }

    fn print_output(&mut self, message: &str, reveal: bool) {
        self.output.push(OutputLine {
            message: message.to_string(),
            reveal,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryClipboard;

    fn editor(text: &str) -> MemoryEditor {
        MemoryEditor::new(text, MemoryClipboard::new())
    }

    #[tokio::test]
    async fn test_apply_edits_carries_cursors() {
        let mut ed = editor("a(bc) d(ef)");
        ed.set_cursor_offsets(&[3, 9]);
        let applied = ed
            .apply_edits(vec![
                TextEdit::delete(Span::new(8, 10)),
                TextEdit::delete(Span::new(2, 4)),
            ])
            .await
            .unwrap();
        assert!(applied);
        assert_eq!(ed.text(), "a() d()");
        assert_eq!(ed.cursor_offsets(), vec![2, 6]);
    }

    #[tokio::test]
    async fn test_read_only_rejects_edits() {
        let mut ed = editor("(x)");
        ed.set_read_only(true);
        let applied = ed
            .apply_edits(vec![TextEdit::delete(Span::new(1, 2))])
            .await
            .unwrap();
        assert!(!applied);
        assert_eq!(ed.text(), "(x)");
    }

    #[tokio::test]
    async fn test_undo_restores_text_and_cursors() {
        let mut ed = editor("f(a, b)");
        ed.set_cursor_offsets(&[3]);
        ed.apply_edits(vec![TextEdit::delete(Span::new(2, 6))]).await.unwrap();
        assert_eq!(ed.text(), "f()");

        assert!(ed.undo());
        assert_eq!(ed.text(), "f(a, b)");
        assert_eq!(ed.cursor_offsets(), vec![3]);
        assert!(ed.redo());
        assert_eq!(ed.text(), "f()");
    }

    #[test]
    fn test_highlight_dispose_removes_decoration() {
        let mut ed = editor("(x)");
        let range = Range::new(Position::new(0, 0), Position::new(0, 3));
        let mut handle = ed.highlight(vec![range], HighlightStyle::Yank);
        assert_eq!(ed.highlights().len(), 1);
        handle.dispose();
        assert!(ed.highlights().is_empty());
    }

    #[test]
    fn test_insert_and_backspace_at_every_cursor() {
        let mut ed = editor("ab\ncd");
        ed.set_cursor_offsets(&[1, 4]);
        assert!(ed.insert_at_cursors("X"));
        assert_eq!(ed.text(), "aXb\ncXd");
        assert_eq!(ed.cursor_offsets(), vec![2, 6]);

        assert!(ed.backspace());
        assert_eq!(ed.text(), "ab\ncd");
    }

    #[test]
    fn test_add_and_collapse_cursors() {
        let mut ed = editor("one\ntwo\nthree");
        ed.set_cursor_offsets(&[1]);
        ed.add_cursor_below();
        ed.add_cursor_below();
        ed.add_cursor_below();
        assert_eq!(ed.cursor_offsets(), vec![1, 5, 9]);
        ed.collapse_cursors();
        assert_eq!(ed.cursor_offsets(), vec![1]);
    }

    #[test]
    fn test_crlf_is_normalized() {
        let ed = editor("a\r\nb");
        assert_eq!(ed.text(), "a\nb");
    }

    #[test]
    fn test_unfocused_has_no_snapshot() {
        let mut ed = editor("x");
        ed.set_focused(false);
        assert!(ed.snapshot().is_none());
    }
}
