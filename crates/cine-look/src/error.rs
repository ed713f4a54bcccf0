//! Error types for look file loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for look file operations.
pub type LookResult<T> = Result<T, LookError>;

/// Errors that can occur while loading or mapping a look file.
#[derive(Debug, Error)]
pub enum LookError {
    /// I/O error reading a look file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialisation error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Look file not found.
    #[error("look file not found: {path}")]
    NotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Name that matches no known preset.
    #[error("unknown {kind}: '{name}'")]
    UnknownPreset {
        /// Which list was searched (film preset, grain stock, ...).
        kind: &'static str,
        /// The name as written in the file.
        name: String,
    },

    /// Value that cannot be clamped into range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `glow.radius`.
        field: String,
        /// Description of what's wrong.
        reason: String,
    },
}
