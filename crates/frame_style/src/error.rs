//! Style loading errors

use thiserror::Error;

/// Errors raised while loading style documents
#[derive(Debug, Error)]
pub enum StyleError {
    /// Document is not valid TOML or has the wrong shape
    #[error("Failed to parse font document: {0}")]
    Parse(#[from] toml::de::Error),

    /// Document parsed but defines no versions
    #[error("Font document defines no versions")]
    EmptyFontDocument,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StyleError>;
