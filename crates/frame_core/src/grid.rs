//! Chest grid geometry

use crate::error::{FrameError, Result};
use crate::id::SlotIndex;
use serde::{Deserialize, Serialize};

/// Slots in one chest row
pub const SLOTS_PER_ROW: usize = 9;

/// Largest chest the host can display
pub const MAX_ROWS: usize = 6;

/// A fixed-size chest grid of `rows × 9` slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
}

impl Grid {
    /// Create a grid, validating the row count
    pub fn new(rows: usize) -> Result<Self> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(FrameError::InvalidRows(rows));
        }
        Ok(Self { rows })
    }

    /// Create a grid, clamping the row count into the valid range
    pub fn clamped(rows: usize) -> Self {
        Self {
            rows: rows.clamp(1, MAX_ROWS),
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of slots
    #[inline]
    pub fn size(&self) -> usize {
        self.rows * SLOTS_PER_ROW
    }

    /// Index of the bottom-right slot
    #[inline]
    pub fn last_slot(&self) -> SlotIndex {
        self.size() - 1
    }

    /// Index of the bottom-left slot
    #[inline]
    pub fn last_row_first_slot(&self) -> SlotIndex {
        self.size() - SLOTS_PER_ROW
    }

    /// All slots of the bottom row
    pub fn bottom_row(&self) -> core::ops::RangeInclusive<SlotIndex> {
        self.last_row_first_slot()..=self.last_slot()
    }

    /// Check if a slot lies inside the grid
    #[inline]
    pub fn contains(&self, slot: SlotIndex) -> bool {
        slot < self.size()
    }

    /// Validate a slot index against the grid
    pub fn check(&self, slot: SlotIndex) -> Result<SlotIndex> {
        if self.contains(slot) {
            Ok(slot)
        } else {
            Err(FrameError::InvalidSlot {
                slot,
                size: self.size(),
            })
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self { rows: MAX_ROWS }
    }
}
