//! Event handlers for the application

mod editor;

use crate::app::App;
use crate::app::editor::Position;
use crate::host::{keys, EditorHost};
use crate::motion::{CaptureInput, MotionRequest, OnCancel, OnComplete, Operation};
use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use rust_i18n::t;
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

impl App {
    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            // Motions completed by the last key press
            self.run_pending_motions().await;

            terminal.draw(|f| crate::ui::draw(f, self))?;

            // Poll faster while a yank highlight is waiting to fade
            let poll_duration = if self.editor.highlights().is_empty() {
                Duration::from_millis(100)
            } else {
                Duration::from_millis(25)
            };

            if event::poll(poll_duration)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse)?;
                    }
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Execute every motion delivered since the last call
    pub async fn run_pending_motions(&mut self) {
        while let Ok(request) = self.motion_rx.try_recv() {
            self.execute_motion(request).await;
        }
    }

    async fn execute_motion(&mut self, request: MotionRequest) {
        match self.executor.execute(&mut self.editor, &request).await {
            Ok(report) => {
                if report.operation == Operation::Delete {
                    self.dirty = true;
                }
            }
            // The executor has already told the user
            Err(e) => tracing::debug!(motion = %request, error = %e, "motion failed"),
        }
    }

    /// Continuations for a new capture: completed motions go to the event loop
    pub(crate) fn motion_callbacks(&self) -> (OnComplete, OnCancel) {
        let tx = self.motion_tx.clone();
        let on_complete: OnComplete = Box::new(move |request| {
            if tx.send(request).is_err() {
                tracing::warn!(motion = %request, "motion dropped: event loop is gone");
            }
        });
        (on_complete, Box::new(|| {}))
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear messages on any keypress
        self.dismiss_message();

        // Quit shortcut - always works
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.router.cancel();
            self.should_quit = true;
            return Ok(());
        }

        if self.context().get(keys::CAPTURING) {
            return self.handle_capture(key);
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.save();
            return Ok(());
        }

        if self.context().get(keys::TEXT_INPUT) {
            self.handle_insert_mode(key)
        } else {
            self.handle_normal_mode(key)
        }
    }

    /// A motion owns the keyboard: every key goes to it
    fn handle_capture(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl and Alt chords are commands, not motion keys
        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let input = match key.code {
            KeyCode::Esc => CaptureInput::Cancel,
            KeyCode::Enter => CaptureInput::Char('\n'),
            KeyCode::Char(c) if !chord => CaptureInput::Char(c),
            // Cursor keys abandon the motion and still move
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End => {
                return self.handle_normal_mode(key);
            }
            _ => CaptureInput::Cancel,
        };
        self.router.dispatch(input);
        Ok(())
    }

    /// Handle mouse input (click to place the cursor, wheel to scroll)
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(_) => {
                if let Some(offset) = self.offset_at(mouse.column, mouse.row) {
                    self.router.dispatch(CaptureInput::SelectionChanged);
                    self.editor.set_cursor_offsets(&[offset]);
                }
            }
            MouseEventKind::ScrollUp => {
                self.scroll_y = self.scroll_y.saturating_sub(3);
            }
            MouseEventKind::ScrollDown => {
                let max_scroll = self.editor.document().line_count().saturating_sub(1);
                self.scroll_y = (self.scroll_y + 3).min(max_scroll);
            }
            _ => {}
        }

        Ok(())
    }

    /// Char offset under a screen cell of the editor area
    fn offset_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.editor_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }

        let doc = self.editor.document();
        let last_line = doc.line_count().saturating_sub(1);
        let line = (self.scroll_y + usize::from(row - area.y)).min(last_line);
        let target = usize::from(column - area.x);
        let start = doc.offset_of(Position::new(line, 0));

        // Walk display columns so wide chars map to one char column
        let mut width = 0;
        let mut char_column = 0;
        for c in doc.chars()[start..start + doc.line_len(line)].iter() {
            let w = c.width().unwrap_or(0);
            if width + w > target {
                break;
            }
            width += w;
            char_column += 1;
        }
        Some(doc.offset_of(Position::new(line, char_column)))
    }

    /// Write the buffer back to its file
    fn save(&mut self) {
        let Some(path) = self.path.clone() else {
            self.editor.print_output(&t!("file.no_path"), true);
            return;
        };
        match std::fs::write(&path, self.editor.text()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved");
                self.dirty = false;
                self.editor
                    .print_output(&t!("file.saved", path = path.display()), false);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "save failed");
                self.editor
                    .print_output(&t!("file.save_failed", error = e), true);
            }
        }
    }
}
