//! Clipboard backends

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::sync::Arc;

pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<()>;
    fn get_text(&mut self) -> Result<String>;
}

/// The system clipboard via arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write clipboard")
    }

    fn get_text(&mut self) -> Result<String> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
        clipboard.get_text().context("Failed to read clipboard")
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String> {
        self.contents
            .lock()
            .clone()
            .context("Clipboard is empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shares_contents() {
        let mut clipboard = MemoryClipboard::new();
        let observer = clipboard.clone();
        assert!(clipboard.get_text().is_err());

        clipboard.set_text("yanked").unwrap();
        assert_eq!(observer.contents().as_deref(), Some("yanked"));
    }
}
