//! Identifiers for pages, viewers and rendered inventories

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Index of a slot inside one grid
pub type SlotIndex = usize;

/// Page identifier. Page 0 is the global page whose static items every
/// other page inherits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId(pub u32);

impl PageId {
    /// The shared global page
    pub const GLOBAL: PageId = PageId(0);

    /// Check if this is the global page
    #[inline]
    pub const fn is_global(&self) -> bool {
        self.0 == 0
    }

    /// The page after this one
    #[inline]
    pub const fn next(&self) -> PageId {
        PageId(self.0 + 1)
    }

    /// The page before this one, if any
    #[inline]
    pub fn prev(&self) -> Option<PageId> {
        self.0.checked_sub(1).map(PageId)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Stable identity of a viewer (a player on the host)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ViewerId(pub Uuid);

impl ViewerId {
    /// Create a random viewer id
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying uuid
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity token of a GUI handler. Every inventory a handler renders
/// carries this id so host events can be routed back by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(pub u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

/// Identity of one concrete rendered inventory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InventoryKey(pub u64);

impl fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inventory#{}", self.0)
    }
}

/// Thread-safe generator for handler and inventory identities
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a new ID generator
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Generate the next handler id
    pub fn next_handler(&self) -> HandlerId {
        HandlerId(self.bump())
    }

    /// Generate the next inventory key
    pub fn next_inventory(&self) -> InventoryKey {
        InventoryKey(self.bump())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide generator; identities only need to be unique, not dense.
pub static IDS: IdGenerator = IdGenerator::new();
