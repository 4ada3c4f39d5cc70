//! textobj - vim-style text objects for a terminal editor
//!
//! Resolves delimiter-based text objects (`di(`, `ya"`, `vi{` with counts)
//! around every cursor and applies them through an editor host.

#[macro_use]
extern crate rust_i18n;

// Initialize i18n with locales from the "locales" directory
// Fallback to English if translation not found
i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod host;
pub mod logging;
pub mod motion;
pub mod ui;

/// Locales shipped in `locales/`
const AVAILABLE_LOCALES: &[&str] = &["en", "pt-BR"];

/// Pick the message locale: the config override if any, else the system
/// locale, else English
pub fn init_locale(config_locale: Option<&str>) {
    let requested = config_locale
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let locale = match_locale(&requested);
    tracing::debug!(%requested, %locale, "locale selected");
    rust_i18n::set_locale(locale);
}

/// Map a system locale string (`pt_BR.UTF-8`, `C`, `de-AT`) to a shipped one
fn match_locale(requested: &str) -> &'static str {
    let tag = requested
        .split('.')
        .next()
        .unwrap_or_default()
        .replace('_', "-");
    if let Some(exact) = AVAILABLE_LOCALES.iter().find(|l| l.eq_ignore_ascii_case(&tag)) {
        return *exact;
    }
    // Fall back to any locale sharing the base language
    let base = tag.split('-').next().unwrap_or_default();
    AVAILABLE_LOCALES
        .iter()
        .find(|l| !base.is_empty() && l.split('-').next() == Some(base))
        .copied()
        .unwrap_or("en")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_locale() {
        assert_eq!(match_locale("pt_BR.UTF-8"), "pt-BR");
        assert_eq!(match_locale("pt-PT"), "pt-BR");
        assert_eq!(match_locale("en_US"), "en");
        assert_eq!(match_locale("C"), "en");
        assert_eq!(match_locale("POSIX"), "en");
        assert_eq!(match_locale(""), "en");
        assert_eq!(match_locale("de-AT"), "en");
    }

    #[test]
    fn test_messages_are_localized() {
        assert_eq!(t!("motion.deleted", locale = "en", count = 2), "Deleted 2 text objects");
        assert_eq!(
            t!("motion.deleted", locale = "pt-BR", count = 2),
            "2 objetos de texto apagados"
        );
    }
}
