//! Library error type.

use std::path::PathBuf;

/// Errors surfaced by the library.
///
/// The typing pipeline itself has no failure modes; these come from
/// configuration, name parsing and terminal I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be parsed.
    #[error("invalid config file {path}: {source}")]
    Config {
        /// The offending file.
        path: PathBuf,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A theme name is not in the catalog.
    #[error("unknown theme '{0}' (expected one of: Dracula, GitHub, Night Owl, Duotone Light, VS Dark)")]
    UnknownTheme(String),

    /// A zoom level other than 1 or 2.
    #[error("invalid zoom level {0} (expected 1 or 2)")]
    InvalidZoom(u8),

    /// A reveal unit other than `char` or `grapheme`.
    #[error("invalid reveal unit '{0}' (expected 'char' or 'grapheme')")]
    InvalidRevealUnit(String),
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
