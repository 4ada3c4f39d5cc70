//! Layout management

use crate::app::{App, InputMode};
use crate::host::keys;
use crate::ui::{draw_editor, DefaultTheme};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

/// Draw the main layout
pub fn draw_layout(f: &mut Frame, app: &mut App, area: Rect) {
    // Main vertical layout: editor, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),      // Editor
            Constraint::Length(1),   // Status bar
        ])
        .split(area);

    draw_editor(f, app, chunks[0]);
    draw_status_bar(f, app, chunks[1]);
}

/// Mode badge: the capture wins over the input mode
fn mode_label(app: &App) -> String {
    if app.context().get(keys::CAPTURING) {
        return format!(" {} ", t!("mode.motion"));
    }
    match app.input_mode {
        InputMode::Normal => format!(" {} ", t!("mode.normal")),
        InputMode::Insert => format!(" {} ", t!("mode.insert")),
    }
}

/// Draw the status bar
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = mode_label(app);
    let primary = app.editor.primary().head;
    let cursors = app.editor.selections().len();
    let position = if cursors > 1 {
        format!(" {}  {} ", t!("status.cursors", count = cursors), primary)
    } else {
        format!(" {} ", primary)
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(mode.width() as u16),
            Constraint::Min(10),                          // Message or pending keys
            Constraint::Length(position.width() as u16),
        ])
        .split(area);

    let capturing = app.context().get(keys::CAPTURING);
    f.render_widget(
        Paragraph::new(Span::styled(mode, DefaultTheme::mode(capturing))),
        chunks[0],
    );

    // Pending keys first, then the latest output, then a hint
    let middle = if let Some(keys) = app.pending_keys() {
        Span::styled(format!(" {}", keys), DefaultTheme::info())
    } else if let Some(line) = app.status_message() {
        let style = if line.reveal {
            DefaultTheme::error()
        } else {
            DefaultTheme::success()
        };
        Span::styled(format!(" {}", line.message), style)
    } else {
        Span::styled(format!(" {}", t!("status.hint")), DefaultTheme::dim_text())
    };
    f.render_widget(Paragraph::new(middle).style(DefaultTheme::status_bar()), chunks[1]);

    f.render_widget(
        Paragraph::new(position)
            .style(DefaultTheme::status_bar())
            .alignment(Alignment::Right),
        chunks[2],
    );
}
