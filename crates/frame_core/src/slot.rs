//! First-fit slot allocation

use crate::grid::Grid;
use crate::id::SlotIndex;
use std::collections::BTreeSet;

/// First-fit search over a fixed-size grid.
///
/// The allocator never looks at live inventory contents; callers pass the
/// set of occupied slots from their item cache.
#[derive(Debug, Clone)]
pub struct SlotAllocator<'a> {
    grid: Grid,
    reserved: &'a BTreeSet<SlotIndex>,
}

impl<'a> SlotAllocator<'a> {
    /// Create an allocator over `grid` that skips `reserved`
    pub fn new(grid: Grid, reserved: &'a BTreeSet<SlotIndex>) -> Self {
        Self { grid, reserved }
    }

    /// Lowest slot that is neither reserved nor occupied
    pub fn find_free_slot<F>(&self, occupied: F) -> Option<SlotIndex>
    where
        F: Fn(SlotIndex) -> bool,
    {
        (0..self.grid.size()).find(|slot| !self.reserved.contains(slot) && !occupied(*slot))
    }

    /// Number of slots auto-placement could still use
    pub fn free_count<F>(&self, occupied: F) -> usize
    where
        F: Fn(SlotIndex) -> bool,
    {
        (0..self.grid.size())
            .filter(|slot| !self.reserved.contains(slot) && !occupied(*slot))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fit() {
        let grid = Grid::new(1).unwrap();
        let reserved = BTreeSet::new();
        let allocator = SlotAllocator::new(grid, &reserved);
        let occupied: BTreeSet<usize> = [0, 1, 3].into_iter().collect();
        assert_eq!(allocator.find_free_slot(|s| occupied.contains(&s)), Some(2));
    }

    #[test]
    fn test_skips_reserved() {
        let grid = Grid::new(1).unwrap();
        let reserved: BTreeSet<usize> = [0, 1, 2].into_iter().collect();
        let allocator = SlotAllocator::new(grid, &reserved);
        assert_eq!(allocator.find_free_slot(|_| false), Some(3));
    }

    #[test]
    fn test_none_iff_union_covers_grid() {
        let grid = Grid::new(2).unwrap();
        for reserved_count in 0..=grid.size() {
            let reserved: BTreeSet<usize> = (0..reserved_count).collect();
            let allocator = SlotAllocator::new(grid, &reserved);
            for occupied_from in 0..=grid.size() {
                let occupied = |s: usize| s >= occupied_from;
                let covered = (0..grid.size())
                    .filter(|s| reserved.contains(s) || occupied(*s))
                    .count();
                let found = allocator.find_free_slot(occupied);
                assert_eq!(found.is_none(), covered == grid.size());
                if let Some(slot) = found {
                    assert!(!reserved.contains(&slot));
                    assert!(!occupied(slot));
                }
            }
        }
    }

    #[test]
    fn test_free_count() {
        let grid = Grid::new(1).unwrap();
        let reserved: BTreeSet<usize> = [8].into_iter().collect();
        let allocator = SlotAllocator::new(grid, &reserved);
        assert_eq!(allocator.free_count(|s| s < 2), 6);
    }
}
