//! Editor panel: line numbers, text, cursors and decorations

use crate::app::editor::{Document, Position, Span as TextSpan};
use crate::app::App;
use crate::host::{Highlight, HighlightStyle, Selection};
use crate::ui::DefaultTheme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use rustc_hash::FxHashSet;

/// Line number gutter width (4 digits, a space and the separator)
const LINE_NUMBER_WIDTH: u16 = 6;

/// How a single char cell is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Plain,
    Selected,
    Yanked,
    Cursor,
}

/// Per-offset decorations resolved from the editor state
pub struct Decorations {
    cursors: FxHashSet<usize>,
    selected: Vec<TextSpan>,
    yanked: Vec<TextSpan>,
}

impl Decorations {
    pub fn new(doc: &Document, selections: &[Selection], highlights: &[Highlight]) -> Self {
        let cursors = selections.iter().map(|s| doc.offset_of(s.head)).collect();
        let selected = selections
            .iter()
            .filter(|s| !s.is_collapsed())
            .map(|s| doc.span_of(s.range()))
            .collect();
        let yanked = highlights
            .iter()
            .filter(|h| h.style == HighlightStyle::Yank)
            .flat_map(|h| h.ranges.iter().map(|r| doc.span_of(*r)))
            .collect();
        Self {
            cursors,
            selected,
            yanked,
        }
    }

    /// Cursors win over yank flashes, which win over selections
    pub fn kind(&self, offset: usize) -> CellKind {
        let within = |spans: &[TextSpan]| spans.iter().any(|s| s.start <= offset && offset < s.end);
        if self.cursors.contains(&offset) {
            CellKind::Cursor
        } else if within(&self.yanked) {
            CellKind::Yanked
        } else if within(&self.selected) {
            CellKind::Selected
        } else {
            CellKind::Plain
        }
    }

    fn style(&self, offset: usize) -> Style {
        match self.kind(offset) {
            CellKind::Plain => DefaultTheme::normal_text(),
            CellKind::Selected => DefaultTheme::selected(),
            CellKind::Yanked => DefaultTheme::yanked(),
            CellKind::Cursor => DefaultTheme::cursor(),
        }
    }
}

/// Draw the editor panel with line numbers and scrolling
pub fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let dirty = if app.dirty { " [+]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(DefaultTheme::active_border())
        .title(Span::styled(format!(" {}{} ", app.title(), dirty), DefaultTheme::title()));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if inner_area.width <= LINE_NUMBER_WIDTH + 2 {
        return;
    }

    let line_num_area = Rect {
        width: LINE_NUMBER_WIDTH,
        ..inner_area
    };
    let code_area = Rect {
        x: inner_area.x + LINE_NUMBER_WIDTH,
        width: inner_area.width - LINE_NUMBER_WIDTH,
        ..inner_area
    };
    app.editor_area = code_area;

    let visible_height = code_area.height as usize;
    app.update_scroll(visible_height);

    let doc = app.editor.document();
    let decorations = Decorations::new(&doc, app.editor.selections(), &app.editor.highlights());
    let last_line = doc.line_count().min(app.scroll_y + visible_height);

    let line_numbers: Vec<Line> = (app.scroll_y..last_line)
        .map(|n| Line::from(Span::styled(format!("{:>4} │", n + 1), DefaultTheme::row_number())))
        .collect();
    f.render_widget(Paragraph::new(line_numbers), line_num_area);

    let lines: Vec<Line> = (app.scroll_y..last_line)
        .map(|line| render_line(&doc, line, &decorations))
        .collect();
    f.render_widget(Paragraph::new(lines), code_area);
}

/// One line of text, grouped into runs of equal style
fn render_line(doc: &Document, line: usize, decorations: &Decorations) -> Line<'static> {
    let start = doc.offset_of(Position::new(line, 0));
    let end = start + doc.line_len(line);
    let chars = doc.chars();

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = decorations.style(start);

    for offset in start..end {
        let style = decorations.style(offset);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(match chars[offset] {
            '\t' => ' ',
            c => c,
        });
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    // A cursor past the last char still needs a cell
    if decorations.kind(end) == CellKind::Cursor {
        spans.push(Span::styled(" ", DefaultTheme::cursor()));
    }

    Line::from(spans)
}
