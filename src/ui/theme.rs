//! Color theme

use ratatui::style::{Color, Modifier, Style};

/// Dark palette used by every widget
pub struct DefaultTheme;

impl DefaultTheme {
    pub const BG_DARK: Color = Color::Rgb(24, 24, 32);
    pub const BG_PANEL: Color = Color::Rgb(32, 33, 44);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(58, 60, 82);

    pub const PRIMARY: Color = Color::Rgb(122, 162, 247);
    pub const GOLD: Color = Color::Rgb(224, 175, 104);
    pub const SUCCESS: Color = Color::Rgb(158, 206, 106);
    pub const ERROR: Color = Color::Rgb(247, 118, 142);
    pub const INFO: Color = Color::Rgb(125, 207, 255);

    pub const TEXT: Color = Color::Rgb(192, 202, 245);
    pub const TEXT_DIM: Color = Color::Rgb(115, 122, 162);
    pub const COMMENT: Color = Color::Rgb(86, 95, 137);

    pub fn normal_text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn dim_text() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().bg(Self::BG_PANEL)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().bg(Self::BG_PANEL).fg(Self::TEXT)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn row_number() -> Style {
        Style::default().fg(Self::COMMENT)
    }

    /// Block cursor of every selection head
    pub fn cursor() -> Style {
        Style::default().fg(Self::BG_DARK).bg(Self::TEXT)
    }

    /// Selected text
    pub fn selected() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BG_HIGHLIGHT)
    }

    /// Briefly flashed after a yank
    pub fn yanked() -> Style {
        Style::default().fg(Self::BG_DARK).bg(Self::GOLD)
    }

    /// Mode badge in the status bar
    pub fn mode(capturing: bool) -> Style {
        let bg = if capturing { Self::GOLD } else { Self::PRIMARY };
        Style::default()
            .fg(Self::BG_DARK)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}
