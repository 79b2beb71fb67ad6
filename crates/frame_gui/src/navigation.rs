//! Next/previous page buttons

use crate::event::{ClickEvent, ClickHandler};
use crate::item::GuiItem;
use crate::page::PageStore;
use frame_core::{Grid, ReservedSlots, Result, SlotIndex};
use std::sync::Arc;

/// Sent when "next" is clicked on the last page
pub const LAST_PAGE_MESSAGE: &str = "§cYou are on the last page.";
/// Sent when "previous" is clicked on the first page
pub const FIRST_PAGE_MESSAGE: &str = "§cYou are on the first page.";

/// Navigation configuration, set through
/// [`ChestGuiBuilder::nav`](crate::builder::ChestGuiBuilder::nav)
#[derive(Debug, Clone)]
pub struct Navigation {
    pub next_item: GuiItem,
    pub prev_item: GuiItem,
    /// Distance of the buttons from the bottom row corners
    pub margin: usize,
    /// Explicit slot of the next button
    pub next_slot: Option<SlotIndex>,
    /// Explicit slot of the previous button
    pub prev_slot: Option<SlotIndex>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            next_item: GuiItem::new("ARROW", "§aNext Page"),
            prev_item: GuiItem::new("ARROW", "§aPrevious Page"),
            margin: 0,
            next_slot: None,
            prev_slot: None,
        }
    }
}

impl Navigation {
    /// Slot of the next button on `grid`
    pub fn next_slot_on(&self, grid: Grid) -> SlotIndex {
        self.next_slot
            .unwrap_or_else(|| grid.last_slot().saturating_sub(self.margin))
    }

    /// Slot of the previous button on `grid`
    pub fn prev_slot_on(&self, grid: Grid) -> SlotIndex {
        self.prev_slot
            .unwrap_or_else(|| (grid.last_row_first_slot() + self.margin).min(grid.last_slot()))
    }

    /// Keep automatic placement away from the buttons
    pub fn reserve(&self, reserved: &mut ReservedSlots) {
        reserved.enable_navigation(self.next_slot, self.prev_slot, self.margin);
    }

    /// Put the buttons on every non-global page: no previous button on the
    /// first page, no next button on the last.
    pub fn inject(&self, store: &mut PageStore) -> Result<()> {
        let Some(bounds) = store.bounds() else {
            return Ok(());
        };
        for id in store.content_ids() {
            let Some(grid) = store.page(id).map(|p| p.grid) else {
                continue;
            };
            if id != bounds.first {
                store.set_item(id, self.prev_slot_on(grid), &self.prev_item, Some(previous_page()))?;
            }
            if id != bounds.last {
                store.set_item(id, self.next_slot_on(grid), &self.next_item, Some(next_page()))?;
            }
        }
        Ok(())
    }
}

/// Click handler moving the viewer one page forward
pub fn next_page() -> ClickHandler {
    Arc::new(|event: &mut ClickEvent| {
        let last = event.bounds.map(|b| b.last).unwrap_or(event.page);
        if event.page < last {
            event.open_page(event.page.next());
        } else {
            event.send_message(LAST_PAGE_MESSAGE);
        }
    })
}

/// Click handler moving the viewer one page back
pub fn previous_page() -> ClickHandler {
    Arc::new(|event: &mut ClickEvent| {
        let first = event.bounds.map(|b| b.first).unwrap_or(event.page);
        match event.page.prev() {
            Some(prev) if event.page > first => event.open_page(prev),
            _ => event.send_message(FIRST_PAGE_MESSAGE),
        }
    })
}
