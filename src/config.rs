//! Configuration management for textobj
//!
//! Handles loading and saving settings to ~/.config/textobj/config.json

use crate::app::editor::ResolverOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bounds on the quote search in large documents
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct QuoteSearchConfig {
    /// Documents longer than this (in chars) are searched in a window
    pub threshold: usize,
    /// Chars searched on each side of the cursor
    pub radius: usize,
}

impl Default for QuoteSearchConfig {
    fn default() -> Self {
        let defaults = ResolverOptions::default();
        Self {
            threshold: defaults.quote_window_threshold,
            radius: defaults.quote_window_radius,
        }
    }
}

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// How long a yanked range stays highlighted
    pub yank_highlight_ms: u64,
    pub quote_search: QuoteSearchConfig,
    /// A quote preceded by this char is not a delimiter
    pub escape_char: char,
    /// Locale override (e.g., "pt-BR", "en"). If None, uses system locale
    pub locale: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            yank_highlight_ms: 200,
            quote_search: QuoteSearchConfig::default(),
            escape_char: ResolverOptions::default().escape_char,
            locale: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path (~/.config/textobj/config.json)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("textobj");

        Ok(config_dir.join("config.json"))
    }

    /// Load configuration from disk, creating the default file on first run
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                return Self::default();
            }
        };
        Self::load_or_default(&path)
    }

    /// Load from `path`, falling back to defaults if it is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not write default config"
                );
            }
            return config;
        }

        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = serde_json::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Options for the text object resolver
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            quote_window_threshold: self.quote_search.threshold,
            quote_window_radius: self.quote_search.radius,
            escape_char: self.escape_char,
        }
    }

    pub fn yank_highlight(&self) -> Duration {
        Duration::from_millis(self.yank_highlight_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_resolver() {
        let config = AppConfig::default();
        let options = config.resolver_options();
        assert_eq!(options.quote_window_threshold, 100_000);
        assert_eq!(options.quote_window_radius, 10_000);
        assert_eq!(options.escape_char, '\\');
        assert_eq!(config.yank_highlight(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let json = r#"{ "yank_highlight_ms": 50, "quote_search": { "radius": 7 } }"#;
        fs::write(&path, json).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.yank_highlight_ms, 50);
        assert_eq!(config.quote_search.radius, 7);
        assert_eq!(config.quote_search.threshold, 100_000);
        assert_eq!(config.escape_char, '\\');
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("textobj").join("config.json");

        let config = AppConfig::load_or_default(&path);
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            escape_char: '^',
            locale: Some("pt-BR".into()),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }
}
