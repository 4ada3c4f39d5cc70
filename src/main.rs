//! textobj - terminal editor with vim-style text objects

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use textobj_tui::app::App;
use textobj_tui::config::AppConfig;
use textobj_tui::logging::{self, LogConfig};

/// Text shown when no file is given
const SCRATCH: &str = r#"// Try: put the cursor inside a pair and type di( ya" vi{
// or \ then 2di( for a counted motion. C adds a cursor below.
fn main() {
    let greeting = format!("hello, {}", name(["a", "b"], (1, (2, 3))));
    println!("{greeting} <done> `tick`");
}
"#;

#[derive(Parser, Debug)]
#[command(name = "textobj", version, about = "Edit text with vim-style text objects")]
struct Args {
    /// File to open
    file: Option<PathBuf>,

    /// Config file (default: <config dir>/textobj/config.json)
    #[arg(long, env = "TEXTOBJ_CONFIG")]
    config: Option<PathBuf>,

    /// Log file or directory
    #[arg(long, env = "TEXTOBJ_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = logging::init(LogConfig {
        log_file_path: args.log_file.clone(),
    })?;
    tracing::info!(log_file = %log_file.display(), "textobj starting");

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    textobj_tui::init_locale(config.locale.as_deref());

    let text = match &args.file {
        Some(path) if path.exists() => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        Some(_) => String::new(),
        None => SCRATCH.to_string(),
    };
    let mut app = App::new(&text, args.file.clone(), &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.run(&mut terminal).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "textobj exited with an error");
    }
    result
}
