//! # frame_persist - Slotframe GUI Documents
//!
//! Saves and loads items, GUI settings and whole inventories as TOML:
//! - **Keys**: configurable key names, so existing file layouts keep working
//! - **Documents**: TOML tables addressed by dotted paths, optionally file backed
//! - **Items**: one table per item; identical items share a slot list
//! - **Inventories**: setting plus slot contents, loadable into a GUI builder

pub mod document;
pub mod error;
pub mod inventory;
pub mod item_codec;
pub mod keys;

pub use document::ConfigDocument;
pub use error::{PersistError, Result};
pub use inventory::ConfigStore;
pub use item_codec::{sound_value, ItemCodec};
pub use keys::ConfigKeys;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::ConfigDocument;
    pub use crate::inventory::ConfigStore;
    pub use crate::keys::ConfigKeys;
}
