//! Persistence errors

use frame_audio::SoundError;
use thiserror::Error;

/// Errors from reading or writing GUI documents
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A path segment points at a value that is not a table
    #[error("'{0}' is not a table")]
    NotATable(String),

    #[error("Invalid sound: {0}")]
    Sound(#[from] SoundError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PersistError>;
