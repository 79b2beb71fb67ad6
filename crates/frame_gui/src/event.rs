//! GUI events and the commands handlers leave behind
//!
//! Handlers never call back into the GUI directly. They mutate the event
//! (cancel it, stamp it) and queue [`GuiCommand`]s that the handler applies
//! once dispatch has finished.

use crate::item::GuiItem;
use frame_core::{PageId, SlotIndex, ViewerId};
use std::sync::Arc;

/// Click callback
pub type ClickHandler = Arc<dyn Fn(&mut ClickEvent) + Send + Sync>;
/// Open callback
pub type OpenHandler = Arc<dyn Fn(&mut OpenEvent) + Send + Sync>;
/// Close callback
pub type CloseHandler = Arc<dyn Fn(&mut CloseEvent) + Send + Sync>;

/// How the slot was clicked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClickType {
    #[default]
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    Middle,
    Drop,
    NumberKey(u8),
    Double,
}

impl ClickType {
    /// True for either shift click
    pub fn is_shift(&self) -> bool {
        matches!(self, ClickType::ShiftLeft | ClickType::ShiftRight)
    }
}

/// Work queued by an event handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiCommand {
    /// Switch the viewer to another page of the same GUI
    OpenPage(PageId),
    /// Send a chat message to the viewer
    SendMessage(String),
    /// Close the viewer's inventory
    Close,
    /// Remove an item, compacting dynamic items
    RemoveItem { page: PageId, slot: SlotIndex },
}

/// Lowest and highest non-global page ids of a GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub first: PageId,
    pub last: PageId,
}

impl PageBounds {
    /// Bounds of `ids`, ignoring the global page
    pub fn of(ids: impl IntoIterator<Item = PageId>) -> Option<Self> {
        let mut bounds: Option<PageBounds> = None;
        for id in ids.into_iter().filter(|id| !id.is_global()) {
            bounds = Some(match bounds {
                None => PageBounds { first: id, last: id },
                Some(b) => PageBounds {
                    first: b.first.min(id),
                    last: b.last.max(id),
                },
            });
        }
        bounds
    }
}

/// A click inside a GUI inventory
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub viewer: ViewerId,
    /// Page the viewer is on
    pub page: PageId,
    pub slot: SlotIndex,
    pub click: ClickType,
    /// Item bound to the slot; stamped before the item's own callback runs
    pub item: Option<GuiItem>,
    pub bounds: Option<PageBounds>,
    pub cancelled: bool,
    pub commands: Vec<GuiCommand>,
}

impl ClickEvent {
    pub fn new(viewer: ViewerId, page: PageId, slot: SlotIndex, click: ClickType) -> Self {
        Self {
            viewer,
            page,
            slot,
            click,
            item: None,
            bounds: None,
            cancelled: false,
            commands: Vec::new(),
        }
    }

    /// Cancel the click so the host does not move the item
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn open_page(&mut self, page: PageId) {
        self.commands.push(GuiCommand::OpenPage(page));
    }

    pub fn send_message(&mut self, message: impl Into<String>) {
        self.commands.push(GuiCommand::SendMessage(message.into()));
    }

    pub fn close(&mut self) {
        self.commands.push(GuiCommand::Close);
    }

    /// Remove the clicked item
    pub fn remove_item(&mut self) {
        let (page, slot) = (self.page, self.slot);
        self.commands.push(GuiCommand::RemoveItem { page, slot });
    }
}

/// A viewer opened one of the GUI's inventories
#[derive(Debug, Clone)]
pub struct OpenEvent {
    pub viewer: ViewerId,
    pub page: PageId,
    pub commands: Vec<GuiCommand>,
}

impl OpenEvent {
    pub fn new(viewer: ViewerId, page: PageId) -> Self {
        Self {
            viewer,
            page,
            commands: Vec::new(),
        }
    }

    pub fn send_message(&mut self, message: impl Into<String>) {
        self.commands.push(GuiCommand::SendMessage(message.into()));
    }
}

/// A viewer closed one of the GUI's inventories
#[derive(Debug, Clone)]
pub struct CloseEvent {
    pub viewer: ViewerId,
    /// Page that was open, when still tracked
    pub page: Option<PageId>,
    pub commands: Vec<GuiCommand>,
}

impl CloseEvent {
    pub fn new(viewer: ViewerId, page: Option<PageId>) -> Self {
        Self {
            viewer,
            page,
            commands: Vec::new(),
        }
    }

    pub fn send_message(&mut self, message: impl Into<String>) {
        self.commands.push(GuiCommand::SendMessage(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_skip_global() {
        let bounds = PageBounds::of([PageId(0), PageId(3), PageId(1), PageId(7)]).unwrap();
        assert_eq!(bounds.first, PageId(1));
        assert_eq!(bounds.last, PageId(7));
        assert_eq!(PageBounds::of([PageId::GLOBAL]), None);
    }

    #[test]
    fn test_click_commands_queue_in_order() {
        let mut event = ClickEvent::new(ViewerId::random(), PageId(2), 4, ClickType::Left);
        event.send_message("hi");
        event.remove_item();
        event.open_page(PageId(3));
        assert_eq!(
            event.commands,
            vec![
                GuiCommand::SendMessage("hi".into()),
                GuiCommand::RemoveItem { page: PageId(2), slot: 4 },
                GuiCommand::OpenPage(PageId(3)),
            ]
        );
        assert!(!event.cancelled);
        event.cancel();
        assert!(event.cancelled);
    }
}
