//! Editor keyboard handlers

use crate::app::editor::{motions, Document};
use crate::app::{App, InputMode};
use crate::host::EditorHost;
use crate::motion::{CaptureInput, Operation};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_i18n::t;

impl App {
    /// Handle Insert mode - typing at every cursor
    pub(crate) fn handle_insert_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.set_mode(InputMode::Normal),
            KeyCode::Enter => self.insert("\n"),
            // Tab = insert 4 spaces for indentation
            KeyCode::Tab => self.insert("    "),
            KeyCode::Char(c) => self.insert(&c.to_string()),
            KeyCode::Backspace => {
                if self.editor.backspace() {
                    self.dirty = true;
                }
            }
            KeyCode::Left => self.move_cursors(motions::left),
            KeyCode::Right => self.move_cursors(motions::right),
            KeyCode::Up => self.move_cursors(motions::up),
            KeyCode::Down => self.move_cursors(motions::down),
            KeyCode::Home => self.move_cursors(motions::line_start),
            KeyCode::End => self.move_cursors(motions::line_end),
            _ => {}
        }
        Ok(())
    }

    /// Handle Normal mode - vim commands
    pub(crate) fn handle_normal_mode(&mut self, key: KeyEvent) -> Result<()> {
        // `d`, `y` or `v` already typed: only a scope can follow
        if let Some(operation) = self.pending_operator.take() {
            if let KeyCode::Char(scope @ ('i' | 'a')) = key.code {
                self.start_direct_motion(operation, scope);
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') && self.editor.redo() {
                self.dirty = true;
            }
            return Ok(());
        }

        match key.code {
            // Movement
            KeyCode::Char('h') | KeyCode::Left => {
                self.move_cursors(motions::left);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.move_cursors(motions::right);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursors(motions::up);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursors(motions::down);
            }
            KeyCode::Char('w') => {
                self.move_cursors(motions::word_forward);
            }
            KeyCode::Char('b') => {
                self.move_cursors(motions::word_backward);
            }
            KeyCode::Char('e') => {
                self.move_cursors(motions::word_end);
            }
            KeyCode::Char('0') | KeyCode::Home => {
                self.move_cursors(motions::line_start);
            }
            KeyCode::Char('$') | KeyCode::End => {
                self.move_cursors(motions::line_end);
            }
            KeyCode::Char('g') => {
                self.move_cursors(|_, _| motions::document_start());
            }
            KeyCode::Char('G') => {
                self.move_cursors(|doc, _| motions::document_end(doc));
            }

            // Cursors
            KeyCode::Char('C') => {
                self.router.dispatch(CaptureInput::SelectionChanged);
                self.editor.add_cursor_below();
            }
            KeyCode::Esc => {
                self.editor.collapse_cursors();
            }

            // Text object motions
            KeyCode::Char(c @ ('d' | 'y' | 'v')) => {
                self.pending_operator = Operation::from_char(c);
            }
            KeyCode::Char('\\') => {
                let (on_complete, on_cancel) = self.motion_callbacks();
                self.router.start_interactive(on_complete, on_cancel);
            }

            // Editing
            KeyCode::Char('i') => {
                self.set_mode(InputMode::Insert);
            }
            KeyCode::Char('u') => {
                if self.editor.undo() {
                    self.dirty = true;
                }
            }
            KeyCode::Char('p') => match self.editor.paste() {
                Ok(true) => self.dirty = true,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "paste failed");
                    self.editor
                        .print_output(&t!("clipboard.read_failed", error = e), true);
                }
            },
            _ => {}
        }
        Ok(())
    }

    /// Move every cursor. Any cursor movement abandons a running capture.
    fn move_cursors(&mut self, motion: impl Fn(&Document, usize) -> usize) {
        self.router.dispatch(CaptureInput::SelectionChanged);
        self.editor.move_cursors(motion);
    }

    fn insert(&mut self, text: &str) {
        if self.editor.insert_at_cursors(text) {
            self.dirty = true;
        }
    }

    fn start_direct_motion(&mut self, operation: Operation, scope: char) {
        let prefix = format!("{}{}", operation.as_char(), scope);
        let (on_complete, on_cancel) = self.motion_callbacks();
        if let Err(e) = self.router.start_direct(&prefix, on_complete, on_cancel) {
            tracing::warn!(%prefix, error = %e, "could not start motion");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::config::AppConfig;
    use crate::host::{keys, MemoryClipboard, MemoryEditor};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app(text: &str, cursor: usize) -> (App, MemoryClipboard) {
        let clipboard = MemoryClipboard::new();
        let mut editor = MemoryEditor::new(text, clipboard.clone());
        editor.set_cursor_offsets(&[cursor]);
        (App::with_editor(editor, None, &AppConfig::default()), clipboard)
    }

    fn type_keys(app: &mut App, keys: &str) {
        for c in keys.chars() {
            let code = match c {
                '\n' => KeyCode::Enter,
                c => KeyCode::Char(c),
            };
            app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        }
    }

    #[tokio::test]
    async fn test_direct_motion_from_keys() {
        let (mut app, _) = app("foo(bar, baz)", 6);
        type_keys(&mut app, "di");
        assert!(app.context().get(keys::CAPTURING));
        assert_eq!(app.pending_keys().as_deref(), Some("di"));

        type_keys(&mut app, "(");
        assert!(!app.context().get(keys::CAPTURING));
        app.run_pending_motions().await;
        assert_eq!(app.editor.text(), "foo()");
        assert!(app.dirty);
    }

    #[tokio::test]
    async fn test_interactive_motion_from_keys() {
        let (mut app, _) = app("(a(b(c)d)e)", 5);
        type_keys(&mut app, "\\2di(");
        app.run_pending_motions().await;
        assert_eq!(app.editor.text(), "(a()e)");
    }

    #[tokio::test]
    async fn test_yank_from_keys() {
        let (mut app, clipboard) = app("x = \"hello\"", 7);
        type_keys(&mut app, "yi\"");
        app.run_pending_motions().await;
        assert_eq!(clipboard.contents().as_deref(), Some("hello"));
        assert_eq!(app.editor.text(), "x = \"hello\"");
    }

    #[tokio::test]
    async fn test_escape_cancels_capture_then_collapses() {
        let (mut app, _) = app("(a)\n(b)", 1);
        type_keys(&mut app, "C");
        assert_eq!(app.editor.selections().len(), 2);

        type_keys(&mut app, "\\2d");
        assert!(app.context().get(keys::CAPTURING));
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert!(!app.context().get(keys::CAPTURING));
        assert_eq!(app.editor.selections().len(), 2);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert_eq!(app.editor.selections().len(), 1);
        app.run_pending_motions().await;
        assert_eq!(app.editor.text(), "(a)\n(b)");
    }

    #[test]
    fn test_cursor_key_abandons_capture() {
        let (mut app, _) = app("(abc)", 2);
        type_keys(&mut app, "va");
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)).unwrap();
        assert!(!app.context().get(keys::CAPTURING));
        assert_eq!(app.editor.cursor_offsets(), vec![3]);
    }

    #[tokio::test]
    async fn test_modified_char_cancels_capture() {
        let (mut app, _) = app("(abc)", 2);
        type_keys(&mut app, "\\2");
        assert!(app.context().get(keys::CAPTURING));

        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)).unwrap();
        assert!(!app.context().get(keys::CAPTURING));

        // later keys are normal-mode keys again
        type_keys(&mut app, "y");
        assert!(app.pending_operator.is_some());
        app.run_pending_motions().await;
        assert_eq!(app.editor.text(), "(abc)");
    }

    #[test]
    fn test_insert_mode_toggles_context() {
        let (mut app, _) = app("", 0);
        assert!(app.context().get(keys::MODAL_LAYERS));
        type_keys(&mut app, "ihi");
        assert!(app.context().get(keys::TEXT_INPUT));
        assert_eq!(app.editor.text(), "hi");
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert!(!app.context().get(keys::TEXT_INPUT));
        assert!(app.dirty);
    }

    #[test]
    fn test_operator_needs_scope() {
        let (mut app, _) = app("(a)", 1);
        type_keys(&mut app, "dx");
        assert!(app.pending_operator.is_none());
        assert!(!app.context().get(keys::CAPTURING));
    }
}
