//! Slots kept free of auto-placed items

use crate::grid::Grid;
use crate::id::SlotIndex;
use std::collections::BTreeSet;

/// Registry of slots that `add_item` must never use.
///
/// The set depends on the grid, so it is computed per allocation rather than
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedSlots {
    /// Explicit slot of the next-page button
    pub next_slot: Option<SlotIndex>,
    /// Explicit slot of the previous-page button
    pub prev_slot: Option<SlotIndex>,
    /// Reserve default button positions and the bottom row
    pub auto_reserve: bool,
    /// Distance of the default button positions from the row corners
    pub margin: usize,
    /// Additional explicitly reserved slots
    pub other: BTreeSet<SlotIndex>,
}

impl ReservedSlots {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve one extra slot
    pub fn with_slot(mut self, slot: SlotIndex) -> Self {
        self.other.insert(slot);
        self
    }

    /// Enable navigation reservation with explicit button slots and margin
    pub fn enable_navigation(
        &mut self,
        next_slot: Option<SlotIndex>,
        prev_slot: Option<SlotIndex>,
        margin: usize,
    ) {
        self.auto_reserve = true;
        self.next_slot = next_slot;
        self.prev_slot = prev_slot;
        self.margin = margin;
    }

    /// Compute the reserved set for a grid
    pub fn compute(&self, grid: Grid) -> BTreeSet<SlotIndex> {
        let last = grid.last_slot();
        let last_row_first = grid.last_row_first_slot();
        let mut slots = BTreeSet::new();
        let mut bottom_row = false;

        match self.next_slot {
            Some(slot) => {
                slots.insert(slot);
            }
            None if self.auto_reserve => {
                slots.insert(last.saturating_sub(self.margin));
                bottom_row = true;
            }
            None => {}
        }

        match self.prev_slot {
            Some(slot) => {
                slots.insert(slot);
            }
            None if self.auto_reserve => {
                slots.insert((last_row_first + self.margin).min(last));
                bottom_row = true;
            }
            None => {}
        }

        if bottom_row {
            slots.extend(grid.bottom_row());
        }
        slots.extend(self.other.iter().copied());
        slots
    }
}
