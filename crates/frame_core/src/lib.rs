//! # frame_core - Slotframe Core
//!
//! Foundational primitives shared by every slotframe crate:
//! - **Identifiers**: page ids, viewer ids, handler and inventory identity tokens
//! - **Grid geometry**: fixed-size chest grids measured in rows of nine slots
//! - **Slot allocation**: first-fit search honoring a reserved-slot set
//! - **Versions**: loose client/server version parsing and comparison
//!
//! Nothing in here knows about items or rendering; it is pure bookkeeping.

pub mod error;
pub mod grid;
pub mod id;
pub mod reserved;
pub mod slot;
pub mod version;

pub use error::*;
pub use grid::*;
pub use id::*;
pub use reserved::*;
pub use slot::*;
pub use version::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{FrameError, Result};
    pub use crate::grid::{Grid, SLOTS_PER_ROW};
    pub use crate::id::{HandlerId, IdGenerator, InventoryKey, PageId, SlotIndex, ViewerId};
    pub use crate::reserved::ReservedSlots;
    pub use crate::slot::SlotAllocator;
    pub use crate::version::GameVersion;
}
