//! Configuration: a JSON file with defaults for every field.
//!
//! ```json
//! {
//!   "theme": "Dracula",
//!   "zoom": 2,
//!   "language": "rs",
//!   "typing": { "interval_ms": 30, "unit": "grapheme" },
//!   "show_caret": true
//! }
//! ```
//!
//! Missing fields take their defaults; command-line flags override the file.

use crate::app::EngineConfig;
use crate::error::{Error, Result};
use crate::mode::ZoomLevel;
use crate::render::DEFAULT_LANGUAGE;
use crate::style::Theme;
use crate::typing::{Clocking, RevealUnit, TypingConfig};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

/// Buffer shown when no file is given.
pub const DEFAULT_SOURCE: &str = "const isExample = animations.some(() => {})";

/// Typing animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingSection {
    /// Milliseconds between two revealed units.
    pub interval_ms: u64,
    /// Unit revealed per tick.
    pub unit: RevealUnit,
}

impl Default for TypingSection {
    fn default() -> Self {
        Self {
            interval_ms: 20,
            unit: RevealUnit::Char,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial theme.
    #[serde(deserialize_with = "theme_by_name")]
    pub theme: Theme,
    /// Initial zoom (1 or 2).
    pub zoom: ZoomLevel,
    /// Language tag handed to the tokenizer.
    pub language: String,
    /// Typing animation.
    pub typing: TypingSection,
    /// Input poll timeout in milliseconds.
    pub input_poll_timeout_ms: u64,
    /// Upper bound on repaints per second.
    pub target_fps: u32,
    /// Draw a caret after the revealed text while typing.
    pub show_caret: bool,
    /// Capture the mouse for clickable controls.
    pub enable_mouse: bool,
    /// Initial source buffer.
    pub source: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            zoom: ZoomLevel::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            typing: TypingSection::default(),
            input_poll_timeout_ms: 10,
            target_fps: 60,
            show_caret: true,
            enable_mouse: true,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl Config {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Config`] if it is
    /// not valid config JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Scheduler settings.
    pub fn typing_config(&self) -> TypingConfig {
        TypingConfig {
            interval: Duration::from_millis(self.typing.interval_ms.max(1)),
            unit: self.typing.unit,
            clocking: Clocking::Threaded,
        }
    }

    /// Terminal front-end settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            target_fps: self.target_fps,
            input_poll_timeout: Duration::from_millis(self.input_poll_timeout_ms),
            enable_mouse: self.enable_mouse,
            alternate_screen: true,
        }
    }
}

/// Accept any spelling [`Theme::from_str`](std::str::FromStr) accepts.
fn theme_by_name<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Theme, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, Theme::NightOwl);
        assert_eq!(config.zoom, ZoomLevel::X1);
        assert_eq!(config.language, "tsx");
        assert_eq!(config.typing_config().interval, Duration::from_millis(20));
        assert_eq!(config.source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(r#"{ "theme": "dracula", "zoom": 2, "typing": { "unit": "grapheme" } }"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.theme, Theme::Dracula);
        assert_eq!(config.zoom, ZoomLevel::X2);
        assert_eq!(config.typing.unit, RevealUnit::Grapheme);
        assert_eq!(config.typing.interval_ms, 20);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let file = write_config(r#"{ "zoom": 3 }"#);
        assert!(matches!(Config::load(file.path()), Err(Error::Config { .. })));

        let file = write_config(r#"{ "theme": "Solarized" }"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Solarized"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(Config::load(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn test_engine_config() {
        let config = Config {
            input_poll_timeout_ms: 25,
            enable_mouse: false,
            ..Config::default()
        };
        let engine = config.engine_config();
        assert_eq!(engine.input_poll_timeout, Duration::from_millis(25));
        assert!(!engine.enable_mouse);
    }
}
