//! Sound errors

use thiserror::Error;

/// Errors raised while parsing or loading sounds
#[derive(Debug, Error)]
pub enum SoundError {
    /// Descriptor without a sound name
    #[error("Sound descriptor '{0}' has no sound name")]
    MissingName(String),

    /// Field that is not a number
    #[error("Invalid number '{token}' in sound descriptor '{descriptor}'")]
    InvalidNumber { token: String, descriptor: String },

    /// More than three numeric fields
    #[error("Sound descriptor '{0}' has too many fields")]
    TooManyFields(String),

    /// Registry entry that is neither a string nor a list of strings
    #[error("Sound entry '{0}' must be a descriptor or a list of descriptors")]
    InvalidEntry(String),

    /// Aliases referencing each other
    #[error("Sound alias cycle through '{0}'")]
    AliasCycle(String),

    /// Reference to an unknown id
    #[error("Unknown sound '{0}'")]
    UnknownSound(String),

    /// Document is not valid TOML
    #[error("Failed to parse sound document: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SoundError>;
