//! Page models
//!
//! Pages live in a flat arena keyed by [`PageId`]. Page 0 is the global
//! page: its static items and their click handlers are copied into every
//! page created after them, its dynamic items are not.

use crate::config::GuiSetting;
use crate::event::{ClickHandler, CloseHandler, OpenHandler, PageBounds};
use crate::item::GuiItem;
use frame_core::{FrameError, Grid, PageId, ReservedSlots, Result, SlotAllocator, SlotIndex};
use std::collections::{BTreeMap, BTreeSet};

/// An item placed by automatic allocation, with the caller's callback
#[derive(Clone)]
pub struct DynamicEntry {
    pub item: GuiItem,
    pub on_click: Option<ClickHandler>,
}

/// One page: item cache, slot handlers and dynamic tracking
pub struct Page {
    pub id: PageId,
    pub setting: GuiSetting,
    pub grid: Grid,
    /// Slot → item; authoritative for occupancy
    pub items: BTreeMap<SlotIndex, GuiItem>,
    pub click_handlers: BTreeMap<SlotIndex, ClickHandler>,
    pub dynamic: BTreeMap<SlotIndex, DynamicEntry>,
    /// Slots emptied by removal; the global overlay leaves them empty
    pub cleared: BTreeSet<SlotIndex>,
    pub on_open: Option<OpenHandler>,
    pub on_close: Option<CloseHandler>,
    pub on_click: Option<ClickHandler>,
    /// Where overflowing items go next; only moves forward
    pub fill_cursor: PageId,
}

impl Page {
    fn new(id: PageId, setting: GuiSetting) -> Result<Self> {
        let grid = setting.grid()?;
        Ok(Self {
            id,
            setting,
            grid,
            items: BTreeMap::new(),
            click_handlers: BTreeMap::new(),
            dynamic: BTreeMap::new(),
            cleared: BTreeSet::new(),
            on_open: None,
            on_close: None,
            on_click: None,
            fill_cursor: id,
        })
    }

    /// True when `slot` is an automatically placed item
    pub fn is_dynamic(&self, slot: SlotIndex) -> bool {
        self.dynamic.contains_key(&slot)
    }

    /// Items that are not dynamic
    pub fn static_items(&self) -> impl Iterator<Item = (SlotIndex, &GuiItem)> {
        self.items
            .iter()
            .filter(|(slot, _)| !self.dynamic.contains_key(slot))
            .map(|(slot, item)| (*slot, item))
    }

    /// True when the page has no items at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("rows", &self.grid.rows())
            .field("items", &self.items.len())
            .field("dynamic", &self.dynamic.len())
            .field("fill_cursor", &self.fill_cursor)
            .finish()
    }
}

/// The page arena of one GUI
#[derive(Debug)]
pub struct PageStore {
    pages: BTreeMap<PageId, Page>,
    /// Slots automatic placement must avoid
    pub reserved: ReservedSlots,
    pub(crate) debugging: bool,
}

impl PageStore {
    /// Create a store holding only the global page
    pub fn new(setting: GuiSetting) -> Result<Self> {
        let mut pages = BTreeMap::new();
        pages.insert(PageId::GLOBAL, Page::new(PageId::GLOBAL, setting)?);
        Ok(Self {
            pages,
            reserved: ReservedSlots::default(),
            debugging: false,
        })
    }

    /// Create page `id`, inheriting the global page's static items
    pub fn create_page(&mut self, id: PageId, setting: GuiSetting) -> Result<&mut Page> {
        if id.is_global() {
            return Err(FrameError::GlobalPageOverwrite);
        }
        if self.pages.contains_key(&id) {
            return Err(FrameError::DuplicatePage(id));
        }
        let mut page = Page::new(id, setting)?;

        if let Some(global) = self.pages.get(&PageId::GLOBAL) {
            for (slot, item) in global.static_items() {
                if !page.grid.contains(slot) {
                    continue;
                }
                page.items.insert(slot, item.clone());
                if let Some(handler) = global.click_handlers.get(&slot) {
                    page.click_handlers.insert(slot, handler.clone());
                }
            }
        }

        if self.debugging {
            log::debug!("Created page {} ({} inherited items)", id, page.items.len());
        }
        Ok(self.pages.entry(id).or_insert(page))
    }

    /// Id following the highest page id
    pub fn next_page_id(&self) -> PageId {
        self.pages
            .keys()
            .next_back()
            .map(PageId::next)
            .unwrap_or(PageId(1))
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(&id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.get_mut(&id)
    }

    pub fn global(&self) -> Option<&Page> {
        self.pages.get(&PageId::GLOBAL)
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.pages.contains_key(&id)
    }

    /// All page ids, ascending
    pub fn ids(&self) -> impl Iterator<Item = PageId> + '_ {
        self.pages.keys().copied()
    }

    /// Page ids without the global page, ascending
    pub fn content_ids(&self) -> Vec<PageId> {
        self.ids().filter(|id| !id.is_global()).collect()
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn pages_mut(&mut self) -> impl Iterator<Item = &mut Page> {
        self.pages.values_mut()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Lowest and highest non-global page ids
    pub fn bounds(&self) -> Option<PageBounds> {
        PageBounds::of(self.ids())
    }

    /// First slot of page `id` that is neither reserved nor occupied
    pub fn free_slot(&self, id: PageId) -> Option<SlotIndex> {
        let page = self.pages.get(&id)?;
        let reserved = self.reserved.compute(page.grid);
        SlotAllocator::new(page.grid, &reserved).find_free_slot(|slot| page.items.contains_key(&slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store() -> PageStore {
        PageStore::new(GuiSetting::new(3, "Test")).unwrap()
    }

    #[test]
    fn test_new_store_has_global_page() {
        let store = store();
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![PageId::GLOBAL]);
        assert_eq!(store.next_page_id(), PageId(1));
        assert_eq!(store.bounds(), None);
    }

    #[test]
    fn test_invalid_rows_rejected() {
        assert_eq!(
            PageStore::new(GuiSetting::new(7, "Too big")).unwrap_err(),
            FrameError::InvalidRows(7)
        );
        let mut store = store();
        assert!(matches!(
            store.create_page(PageId(1), GuiSetting::new(0, "")),
            Err(FrameError::InvalidRows(0))
        ));
    }

    #[test]
    fn test_create_page_errors() {
        let mut store = store();
        store.create_page(PageId(2), GuiSetting::new(3, "")).unwrap();
        assert_eq!(
            store.create_page(PageId(2), GuiSetting::new(3, "")).unwrap_err(),
            FrameError::DuplicatePage(PageId(2))
        );
        assert_eq!(
            store.create_page(PageId::GLOBAL, GuiSetting::new(3, "")).unwrap_err(),
            FrameError::GlobalPageOverwrite
        );
        assert_eq!(store.next_page_id(), PageId(3));
    }

    #[test]
    fn test_only_static_global_items_inherited() {
        let mut store = store();
        let handler: ClickHandler = Arc::new(|e: &mut crate::event::ClickEvent| e.cancel());
        let global = store.page_mut(PageId::GLOBAL).unwrap();
        global.items.insert(4, GuiItem::new("GLASS", "border"));
        global.click_handlers.insert(4, handler.clone());
        global.items.insert(0, GuiItem::new("DIAMOND", "added"));
        global.dynamic.insert(
            0,
            DynamicEntry {
                item: GuiItem::new("DIAMOND", "added"),
                on_click: None,
            },
        );

        let page = store.create_page(PageId(1), GuiSetting::new(3, "")).unwrap();
        assert_eq!(page.items.keys().copied().collect::<Vec<_>>(), vec![4]);
        assert!(page.click_handlers.contains_key(&4));
        assert!(page.dynamic.is_empty());
    }

    #[test]
    fn test_free_slot_honors_reservation() {
        let mut store = store();
        store.reserved.enable_navigation(None, None, 0);
        let page = store.page_mut(PageId::GLOBAL).unwrap();
        for slot in 0..18 {
            page.items.insert(slot, GuiItem::new("STONE", ""));
        }
        // bottom row of three rows is reserved
        assert_eq!(store.free_slot(PageId::GLOBAL), None);
        assert_eq!(store.free_slot(PageId(9)), None);
    }

    #[test]
    fn test_bounds() {
        let mut store = store();
        store.create_page(PageId(3), GuiSetting::new(1, "")).unwrap();
        store.create_page(PageId(1), GuiSetting::new(1, "")).unwrap();
        let bounds = store.bounds().unwrap();
        assert_eq!((bounds.first, bounds.last), (PageId(1), PageId(3)));
        assert_eq!(store.content_ids(), vec![PageId(1), PageId(3)]);
    }
}
