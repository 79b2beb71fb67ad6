//! Texture lookup errors

use thiserror::Error;

/// Errors raised while looking up skin textures
#[derive(Debug, Error)]
pub enum TextureError {
    /// Transport failure reported by the host's HTTP client
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response was not the expected JSON
    #[error("Invalid profile response: {0}")]
    Json(#[from] serde_json::Error),

    /// Profile has no texture property
    #[error("Profile response carries no textures")]
    MissingTextures,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TextureError>;
