//! Undo/Redo system for the editing surface
//!
//! Implements a vim-like undo system with snapshots of the text and every
//! cursor, so undoing a multi-cursor delete puts all cursors back.

use crate::host::Selection;
use std::collections::VecDeque;

/// A snapshot of the editor state for undo/redo
#[derive(Clone, Debug)]
pub struct EditorSnapshot {
    /// The text content
    pub text: String,
    /// Cursors and selections, primary first
    pub selections: Vec<Selection>,
}

impl EditorSnapshot {
    fn capture(text: &str, selections: &[Selection]) -> Self {
        Self {
            text: text.to_string(),
            selections: selections.to_vec(),
        }
    }

    fn matches(&self, text: &str, selections: &[Selection]) -> bool {
        self.text == text && self.selections == selections
    }
}

/// Bounded undo history; the oldest snapshot falls off first
pub struct UndoManager {
    undo_stack: VecDeque<EditorSnapshot>,
    redo_stack: Vec<EditorSnapshot>,
    max_history: usize,
}

impl UndoManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_history.min(64)),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Record the state about to be replaced. Call before every edit.
    pub fn save_state(&mut self, text: &str, selections: &[Selection]) {
        if self.undo_stack.back().is_some_and(|last| last.matches(text, selections)) {
            return;
        }
        self.undo_stack.push_back(EditorSnapshot::capture(text, selections));
        self.redo_stack.clear();
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
    }

    /// Step back, keeping the current state for redo
    pub fn undo(&mut self, current_text: &str, current: &[Selection]) -> Option<EditorSnapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(EditorSnapshot::capture(current_text, current));
        Some(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current_text: &str, current: &[Selection]) -> Option<EditorSnapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(EditorSnapshot::capture(current_text, current));
        Some(next)
    }
}
