//! Theme error types

use thiserror::Error;

/// Errors surfaced by the theme store and preset registry
///
/// Callers are free to ignore them: every failing operation has already been
/// logged and left state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// A theme token outside `light | dark | auto`
    #[error("invalid theme `{0}`, expected one of: light, dark, auto")]
    InvalidTheme(String),

    /// No preset is registered under this id
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    /// Built-in presets cannot be replaced or removed
    #[error("preset `{0}` is built in and cannot be modified")]
    BuiltInPreset(String),

    /// Preset record failed validation
    #[error("invalid preset: {0}")]
    InvalidPreset(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
