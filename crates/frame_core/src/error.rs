//! Error types for the core library

use crate::id::PageId;
use thiserror::Error;

/// Configuration and placement errors raised while a GUI is being assembled.
///
/// These are programmer errors: they surface while the plugin sets up its
/// menus and never on the host's event-dispatch path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A page with this id was already defined
    #[error("A page with ID {0} already exists")]
    DuplicatePage(PageId),

    /// Attempt to define page 0 explicitly
    #[error("Cannot overwrite the global page (ID 0)")]
    GlobalPageOverwrite,

    /// Navigation configured inside a nested page block
    #[error("Navigation can only be configured at the top-level GUI builder, not inside page {0}")]
    NavigationInNestedPage(PageId),

    /// Chest rows outside 1..=6
    #[error("Invalid row count {0}: chest grids have between 1 and 6 rows")]
    InvalidRows(usize),

    /// Slot index outside of the grid
    #[error("Slot {slot} is outside a grid of {size} slots")]
    InvalidSlot { slot: usize, size: usize },

    /// Referenced page does not exist
    #[error("Page {0} not found")]
    PageNotFound(PageId),

    /// A session was started without a viewer in its style context
    #[error("Cannot start a GUI session without a viewer in the style context")]
    MissingViewer,

    /// Configuration document could not be read
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FrameError>;

impl From<&str> for FrameError {
    fn from(s: &str) -> Self {
        FrameError::Message(s.to_string())
    }
}

impl From<String> for FrameError {
    fn from(s: String) -> Self {
        FrameError::Message(s)
    }
}
