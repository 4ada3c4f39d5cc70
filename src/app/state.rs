//! Application state - core data structures and state management
//!
//! This module contains the main App struct. Key handling and the event
//! loop live in the handlers module.

use crate::config::AppConfig;
use crate::host::{keys, ContextKeys, MemoryEditor, OutputLine, SystemClipboard};
use crate::motion::{MotionExecutor, MotionRequest, MotionRouter, Operation};
use ratatui::layout::Rect;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Input mode for the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Insert,
}

/// Main application state
pub struct App {
    // === Editor ===
    pub editor: MemoryEditor,
    /// File being edited, if any
    pub path: Option<PathBuf>,
    /// Unsaved changes
    pub dirty: bool,
    pub input_mode: InputMode,
    /// Operator typed in normal mode, waiting for `i` or `a`
    pub pending_operator: Option<Operation>,

    // === Motions ===
    pub router: MotionRouter,
    pub executor: MotionExecutor,
    /// Completed motions, executed by the event loop
    pub(crate) motion_tx: mpsc::UnboundedSender<MotionRequest>,
    pub(crate) motion_rx: mpsc::UnboundedReceiver<MotionRequest>,

    // === View ===
    /// First visible line
    pub scroll_y: usize,
    /// Text area of the editor, updated by the UI (for mouse hits)
    pub editor_area: Rect,
    /// Output lines already dismissed from the status bar
    pub(crate) output_seen: usize,

    pub should_quit: bool,
}

impl App {
    pub fn new(text: &str, path: Option<PathBuf>, config: &AppConfig) -> Self {
        let editor = MemoryEditor::new(text, SystemClipboard);
        Self::with_editor(editor, path, config)
    }

    /// Build around an existing editor surface
    pub fn with_editor(editor: MemoryEditor, path: Option<PathBuf>, config: &AppConfig) -> Self {
        let (motion_tx, motion_rx) = mpsc::unbounded_channel();
        let context = ContextKeys::new();

        let mut app = Self {
            editor,
            path,
            dirty: false,
            input_mode: InputMode::Normal,
            pending_operator: None,
            router: MotionRouter::new(context),
            executor: MotionExecutor::new(config.resolver_options(), config.yank_highlight()),
            motion_tx,
            motion_rx,
            scroll_y: 0,
            editor_area: Rect::default(),
            output_seen: 0,
            should_quit: false,
        };
        app.set_mode(InputMode::Normal);
        app
    }

    pub fn context(&self) -> &ContextKeys {
        self.router.context()
    }

    /// Switch mode and publish it to the context keys
    pub fn set_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.pending_operator = None;
        let context = self.router.context();
        context.set(keys::MODAL_LAYERS, mode == InputMode::Normal);
        context.set(keys::TEXT_INPUT, mode == InputMode::Insert);
    }

    /// Message for the status bar, until the next key press
    pub fn status_message(&self) -> Option<&OutputLine> {
        if self.editor.output().len() > self.output_seen {
            self.editor.last_output()
        } else {
            None
        }
    }

    pub(crate) fn dismiss_message(&mut self) {
        self.output_seen = self.editor.output().len();
    }

    /// Keys of the motion being typed, for display
    pub fn pending_keys(&self) -> Option<String> {
        self.router
            .pending_keys()
            .or_else(|| self.pending_operator.map(|op| op.as_char().to_string()))
    }

    /// Keep the primary cursor visible in a view of `height` lines
    pub fn update_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let line = self.editor.primary().head.line;
        if line < self.scroll_y {
            self.scroll_y = line;
        } else if line >= self.scroll_y + height {
            self.scroll_y = line + 1 - height;
        }
    }

    /// File name for the title bar
    pub fn title(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[scratch]".to_string())
    }
}
