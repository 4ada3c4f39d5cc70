//! Terminal UI rendering

mod editor_view;
mod layout;
mod theme;

pub use editor_view::{draw_editor, CellKind, Decorations};
pub use theme::DefaultTheme;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::Block;

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.size();
    f.render_widget(Block::default().style(Style::default().bg(DefaultTheme::BG_DARK)), area);
    layout::draw_layout(f, app, area);
}
