//! Host editor abstraction
//!
//! The motion executor never touches a buffer directly. Everything it needs
//! from the surrounding editor - text snapshots, cursors, batched edits, the
//! clipboard, highlight decorations and the output panel - goes through
//! [`EditorHost`].

mod clipboard;
mod context;
mod memory;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use context::{keys, ContextKeys};
pub use memory::{Highlight, MemoryEditor, OutputLine};

use crate::app::editor::{Document, Position, Range, TextEdit};
use anyhow::Result;
use async_trait::async_trait;

/// A cursor with an optional selection. `head` is where the cursor sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// The selected range, start before end
    pub fn range(&self) -> Range {
        if self.anchor <= self.head {
            Range::new(self.anchor, self.head)
        } else {
            Range::new(self.head, self.anchor)
        }
    }
}

/// Text and cursors of the focused editing surface, taken at one instant
#[derive(Clone, Debug)]
pub struct SurfaceSnapshot {
    pub document: Document,
    pub selections: Vec<Selection>,
}

/// How a decoration is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightStyle {
    /// Briefly marks yanked text
    Yank,
}

/// Removes a decoration when disposed. Disposing twice is a no-op.
pub struct HighlightHandle {
    dispose: Option<Box<dyn FnOnce() + Send>>,
}

impl HighlightHandle {
    pub fn new(dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn dispose(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.dispose.is_none()
    }
}

/// A registration that is undone when released or dropped
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Everything the motion executor needs from the editor it runs in.
///
/// Edits and clipboard writes are async because a real host may need to
/// confirm them; everything else is expected to return immediately.
#[async_trait]
pub trait EditorHost: Send {
    /// Text and cursors of the focused surface, or `None` without one
    fn snapshot(&self) -> Option<SurfaceSnapshot>;

    /// Apply all edits as one atomic change. `Ok(false)` means the host
    /// declined the batch and nothing was changed.
    async fn apply_edits(&mut self, edits: Vec<TextEdit>) -> Result<bool>;

    async fn write_clipboard(&mut self, text: String) -> Result<()>;

    /// Decorate ranges until the returned handle is disposed
    fn highlight(&mut self, ranges: Vec<Range>, style: HighlightStyle) -> HighlightHandle;

    /// Replace all cursors and selections
    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Show a message in the output panel. `reveal` asks the host to bring it
    /// to the user's attention.
    fn print_output(&mut self, message: &str, reveal: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_selection_range_is_ordered() {
        let sel = Selection::new(Position::new(2, 0), Position::new(1, 4));
        assert_eq!(sel.range(), Range::new(Position::new(1, 4), Position::new(2, 0)));
        assert!(!sel.is_collapsed());
    }

    #[test]
    fn test_handles_release_once() {
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let mut handle = HighlightHandle::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        handle.dispose();
        handle.dispose();
        assert!(handle.is_disposed());

        let c = count.clone();
        let mut sub = Subscription::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        sub.release();
        drop(sub);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
