//! # frame_gui - Slotframe Chest GUIs
//!
//! Paginated chest menus for game servers:
//! - **Builder**: a deferred, priority-ordered DSL producing page models
//! - **Placement**: first-fit slots, overflow pages and order-preserving removal
//! - **Navigation**: next/previous buttons with page bounds checks
//! - **Rendering**: per-viewer text, skulls and an optional sliding window
//! - **Runtime**: handlers, sessions and a listener routing host events
//!
//! ## Example
//!
//! ```ignore
//! use frame_gui::prelude::*;
//!
//! let shop = ChestGui::new(3, "&6Shop {page}", |gui| {
//!     gui.nav(|_| {});
//!     for ore in ["IRON_INGOT", "GOLD_INGOT", "DIAMOND"] {
//!         gui.add_item_with(GuiItem::new(ore, ore), |e| e.cancel());
//!     }
//! });
//! let id = shop.open(viewer, None, &services, &mut listener, &mut host)?;
//! ```

pub mod action;
pub mod blueprint;
pub mod buffer;
pub mod builder;
pub mod config;
pub mod event;
pub mod handler;
pub mod host;
pub mod item;
pub mod listener;
pub mod navigation;
pub mod page;
pub mod perf;
pub mod placement;
pub mod render;
pub mod session;

pub use blueprint::{BuildBlock, ChestGui};
pub use buffer::{BufferPlan, BufferSettings};
pub use builder::{ChestGuiBuilder, GlobalHandlers, GuiModel, PageScope};
pub use config::{EventSounds, FrameConfig, FrameServices, GuiSetting};
pub use event::{
    ClickEvent, ClickHandler, ClickType, CloseEvent, CloseHandler, GuiCommand, OpenEvent, OpenHandler, PageBounds,
};
pub use handler::{ClickOutcome, GuiHandler};
pub use host::{Host, InventoryRef};
#[cfg(any(test, feature = "test-util"))]
pub use host::{PlayedSound, RecordingHost};
pub use item::{GuiItem, ItemFlag, AIR};
pub use listener::GuiListener;
pub use navigation::{next_page, previous_page, Navigation};
pub use page::{Page, PageStore};
pub use render::{DisplayItem, Inventory, PageRenderer};
pub use session::GuiSession;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::blueprint::ChestGui;
    pub use crate::builder::{ChestGuiBuilder, PageScope};
    pub use crate::config::{EventSounds, FrameConfig, FrameServices, GuiSetting};
    pub use crate::event::{ClickEvent, ClickType, CloseEvent, OpenEvent};
    pub use crate::host::{Host, InventoryRef};
    pub use crate::item::{GuiItem, ItemFlag};
    pub use crate::listener::GuiListener;
    pub use crate::navigation::Navigation;
    pub use frame_core::{FrameError, PageId, Result, SlotIndex, ViewerId};
    pub use frame_style::{StyleSheet, Viewer};
}
