//! Item placement on the page arena
//!
//! Automatic placement allocates the first free slot and overflows into new
//! pages; explicit placement writes a slot directly. Automatically placed
//! ("dynamic") items across all pages, read in `(page, slot)` order, form a
//! gapless sequence that removal keeps compact.

use crate::event::{ClickEvent, ClickHandler};
use crate::item::GuiItem;
use crate::page::{DynamicEntry, PageStore};
use frame_core::{FrameError, PageId, Result, SlotIndex};
use std::sync::Arc;

/// Click handler that stamps the event with `item`, then runs the item's own
/// callback and finally the caller's
pub fn dispatcher(item: GuiItem, on_click: Option<ClickHandler>) -> ClickHandler {
    Arc::new(move |event: &mut ClickEvent| {
        event.item = Some(item.clone());
        if let Some(own) = &item.on_click {
            own(event);
        }
        if let Some(caller) = &on_click {
            caller(event);
        }
    })
}

impl PageStore {
    fn prepare(&self, page: PageId, item: &GuiItem) -> GuiItem {
        let mut item = item.clone();
        if item.style.is_none() {
            item.style = self.page(page).map(|p| p.setting.style.clone());
        }
        item
    }

    fn bind(&mut self, page: PageId, slot: SlotIndex, entry: DynamicEntry) {
        if let Some(target) = self.page_mut(page) {
            target
                .click_handlers
                .insert(slot, dispatcher(entry.item.clone(), entry.on_click.clone()));
            target.items.insert(slot, entry.item.clone());
            target.cleared.remove(&slot);
            target.dynamic.insert(slot, entry);
        }
    }

    fn place_on(&mut self, page: PageId, entry: DynamicEntry) -> Option<(PageId, SlotIndex)> {
        let slot = self.free_slot(page)?;
        self.bind(page, slot, entry);
        Some((page, slot))
    }

    /// Place `item` in the first free slot of `page`, overflowing into later
    /// pages when it is full.
    ///
    /// Returns where the item landed, or `None` when no page could take it.
    pub fn add_item(
        &mut self,
        page: PageId,
        item: &GuiItem,
        on_click: Option<ClickHandler>,
    ) -> Option<(PageId, SlotIndex)> {
        let origin = self.page(page)?;
        let cursor = origin.fill_cursor;
        let setting = origin.setting.clone();

        let entry = DynamicEntry {
            item: self.prepare(page, item),
            on_click,
        };

        if let Some(placed) = self.place_on(page, entry.clone()) {
            return Some(placed);
        }

        if cursor != page && self.contains(cursor) {
            if let Some(placed) = self.place_on(cursor, entry.clone()) {
                return Some(placed);
            }
        }

        let mut target = cursor;
        while self.contains(target) {
            target = target.next();
        }
        if let Some(origin) = self.page_mut(page) {
            origin.fill_cursor = target;
        }
        if self.debugging {
            log::debug!("Page {} is full, overflowing into new page {}", page, target);
        }
        if let Err(e) = self.create_page(target, setting) {
            log::warn!("Could not create overflow page {}: {}", target, e);
            return None;
        }

        let placed = self.place_on(target, entry);
        if placed.is_none() {
            log::warn!(
                "Overflow page {} has no free slot; every slot is reserved. Item dropped.",
                target
            );
        }
        placed
    }

    /// Place `item` at `slot` of `page`, ignoring reservation. The item is
    /// not dynamic and replaces whatever was there.
    pub fn set_item(
        &mut self,
        page: PageId,
        slot: SlotIndex,
        item: &GuiItem,
        on_click: Option<ClickHandler>,
    ) -> Result<SlotIndex> {
        let item = self.prepare(page, item);
        let target = self.page_mut(page).ok_or(FrameError::PageNotFound(page))?;
        target.grid.check(slot)?;
        target
            .click_handlers
            .insert(slot, dispatcher(item.clone(), on_click));
        target.items.insert(slot, item);
        target.cleared.remove(&slot);
        target.dynamic.remove(&slot);
        Ok(slot)
    }

    /// Every dynamic item in `(page, slot)` order
    pub fn dynamic_sequence(&self) -> Vec<(PageId, SlotIndex)> {
        self.pages()
            .flat_map(|page| page.dynamic.keys().map(move |slot| (page.id, *slot)))
            .collect()
    }

    /// Remove the item at `slot` of `page`.
    ///
    /// Static items just leave an empty slot. Removing a dynamic item shifts
    /// every later dynamic item back one position, across page boundaries.
    pub fn remove(&mut self, page: PageId, slot: SlotIndex) {
        let Some(target) = self.page_mut(page) else {
            return;
        };
        if !target.is_dynamic(slot) {
            target.items.remove(&slot);
            target.click_handlers.remove(&slot);
            target.cleared.insert(slot);
            return;
        }

        let sequence = self.dynamic_sequence();
        let Some(start) = sequence.iter().position(|&at| at == (page, slot)) else {
            return;
        };

        for window in sequence[start..].windows(2) {
            let (to, from) = (window[0], window[1]);
            let moved = self
                .page(from.0)
                .and_then(|p| p.dynamic.get(&from.1))
                .cloned();
            if let Some(entry) = moved {
                self.bind(to.0, to.1, entry);
            }
        }

        if let Some(&(last_page, last_slot)) = sequence.last() {
            if let Some(last) = self.page_mut(last_page) {
                last.items.remove(&last_slot);
                last.click_handlers.remove(&last_slot);
                last.dynamic.remove(&last_slot);
                last.cleared.insert(last_slot);
            }
        }
    }

    /// Remove several slots of `page`, highest slot first
    pub fn remove_slots(&mut self, page: PageId, slots: &[SlotIndex]) {
        let mut ordered = slots.to_vec();
        ordered.sort_unstable_by(|a, b| b.cmp(a));
        ordered.dedup();
        for slot in ordered {
            self.remove(page, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuiSetting;
    use crate::event::ClickType;
    use frame_core::ViewerId;
    use frame_style::StyleSheet;
    use parking_lot::Mutex;

    fn store(rows: usize) -> PageStore {
        PageStore::new(GuiSetting::new(rows, "Test")).unwrap()
    }

    fn named(name: &str) -> GuiItem {
        GuiItem::new("PAPER", name)
    }

    fn names(store: &PageStore) -> Vec<(u32, SlotIndex, String)> {
        store
            .pages()
            .flat_map(|p| p.dynamic.iter().map(move |(s, e)| (p.id.0, *s, e.item.name.clone())))
            .collect()
    }

    #[test]
    fn test_add_item_first_fit() {
        let mut store = store(1);
        store.set_item(PageId::GLOBAL, 0, &named("fixed"), None).unwrap();
        assert_eq!(store.add_item(PageId::GLOBAL, &named("a"), None), Some((PageId::GLOBAL, 1)));
        assert_eq!(store.add_item(PageId::GLOBAL, &named("b"), None), Some((PageId::GLOBAL, 2)));
    }

    #[test]
    fn test_overflow_lands_on_page_one() {
        let mut store = store(1);
        for i in 0..9 {
            store.add_item(PageId::GLOBAL, &named(&i.to_string()), None);
        }
        assert_eq!(store.add_item(PageId::GLOBAL, &named("x"), None), Some((PageId(1), 0)));
        assert_eq!(store.add_item(PageId::GLOBAL, &named("y"), None), Some((PageId(1), 1)));
        assert_eq!(store.page(PageId::GLOBAL).unwrap().fill_cursor, PageId(1));
    }

    #[test]
    fn test_overflow_skips_existing_pages() {
        let mut store = store(1);
        store.create_page(PageId(1), GuiSetting::new(1, "")).unwrap();
        store.create_page(PageId(2), GuiSetting::new(1, "")).unwrap();
        for i in 0..9 {
            store.add_item(PageId(1), &named(&i.to_string()), None);
        }
        assert_eq!(store.add_item(PageId(1), &named("x"), None), Some((PageId(3), 0)));
        // the cursor page has room now
        assert_eq!(store.add_item(PageId(1), &named("y"), None), Some((PageId(3), 1)));
    }

    #[test]
    fn test_overflow_into_fully_reserved_page_fails() {
        let mut store = store(1);
        store.reserved.enable_navigation(None, None, 0);
        assert_eq!(store.add_item(PageId::GLOBAL, &named("x"), None), None);
        assert!(store.contains(PageId(1)));
    }

    #[test]
    fn test_add_item_takes_page_style() {
        let mut store = PageStore::new(
            GuiSetting::new(1, "").with_style(StyleSheet::new().with_placeholder("{a}", "1")),
        )
        .unwrap();
        let own = named("own").with_placeholder("{b}", "2");
        store.add_item(PageId::GLOBAL, &named("plain"), None);
        store.add_item(PageId::GLOBAL, &own, None);
        let page = store.page(PageId::GLOBAL).unwrap();
        assert!(page.items[&0].style.as_ref().unwrap().placeholders.contains_key("{a}"));
        let kept = page.items[&1].style.as_ref().unwrap();
        assert!(kept.placeholders.contains_key("{b}") && !kept.placeholders.contains_key("{a}"));
    }

    #[test]
    fn test_set_item_bounds() {
        let mut store = store(2);
        assert_eq!(store.set_item(PageId::GLOBAL, 17, &named("edge"), None), Ok(17));
        assert_eq!(
            store.set_item(PageId::GLOBAL, 18, &named("out"), None),
            Err(FrameError::InvalidSlot { slot: 18, size: 18 })
        );
        assert_eq!(
            store.set_item(PageId(5), 0, &named("nowhere"), None),
            Err(FrameError::PageNotFound(PageId(5)))
        );
    }

    #[test]
    fn test_set_item_ignores_reservation() {
        let mut store = store(1);
        store.reserved.enable_navigation(None, None, 0);
        assert_eq!(store.set_item(PageId::GLOBAL, 8, &named("nav"), None), Ok(8));
        assert!(!store.page(PageId::GLOBAL).unwrap().is_dynamic(8));
    }

    #[test]
    fn test_remove_static_leaves_gap() {
        let mut store = store(1);
        store.set_item(PageId::GLOBAL, 3, &named("fixed"), None).unwrap();
        store.add_item(PageId::GLOBAL, &named("a"), None);
        store.remove(PageId::GLOBAL, 3);
        let page = store.page(PageId::GLOBAL).unwrap();
        assert!(!page.items.contains_key(&3));
        assert!(!page.click_handlers.contains_key(&3));
        assert_eq!(page.items[&0].name, "a");
    }

    #[test]
    fn test_remove_compacts_across_pages() {
        let mut store = store(1);
        for name in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"] {
            store.add_item(PageId::GLOBAL, &named(name), None);
        }
        store.remove(PageId::GLOBAL, 2);
        let after = names(&store);
        let order: Vec<&str> = after.iter().map(|(_, _, n)| n.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "d", "e", "f", "g", "h", "i", "j", "k"]);
        assert_eq!(after[8], (0, 8, "j".to_string()));
        assert_eq!(after[9], (1, 0, "k".to_string()));
        assert!(!store.page(PageId(1)).unwrap().items.contains_key(&1));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = store(1);
        store.add_item(PageId::GLOBAL, &named("a"), None);
        store.remove(PageId::GLOBAL, 5);
        store.remove(PageId(4), 0);
        assert_eq!(names(&store).len(), 1);
    }

    #[test]
    fn test_remove_slots_descending() {
        let mut store = store(1);
        for name in ["a", "b", "c", "d", "e"] {
            store.add_item(PageId::GLOBAL, &named(name), None);
        }
        store.remove_slots(PageId::GLOBAL, &[1, 3]);
        let order: Vec<String> = names(&store).into_iter().map(|(_, _, n)| n).collect();
        assert_eq!(order, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_dispatcher_rebound_after_compaction() {
        let mut store = store(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let seen = seen.clone();
            let tag = name.to_string();
            let on_click: ClickHandler = Arc::new(move |e: &mut ClickEvent| {
                let stamped = e.item.as_ref().map(|i| i.name.clone()).unwrap_or_default();
                seen.lock().push((tag.clone(), stamped));
            });
            store.add_item(PageId::GLOBAL, &named(name), Some(on_click));
        }
        store.remove(PageId::GLOBAL, 0);

        let handler = store.page(PageId::GLOBAL).unwrap().click_handlers[&0].clone();
        let mut event = ClickEvent::new(ViewerId::random(), PageId::GLOBAL, 0, ClickType::Left);
        handler(&mut event);
        assert_eq!(seen.lock().as_slice(), &[("b".to_string(), "b".to_string())]);
        assert!(!store.page(PageId::GLOBAL).unwrap().click_handlers.contains_key(&2));
    }

    #[test]
    fn test_dispatch_runs_item_callback_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let own = order.clone();
        let caller = order.clone();
        let item = named("x").with_on_click(move |_| own.lock().push("item"));
        let handler = dispatcher(item, Some(Arc::new(move |_: &mut ClickEvent| caller.lock().push("caller"))));
        let mut event = ClickEvent::new(ViewerId::random(), PageId(1), 0, ClickType::Left);
        handler(&mut event);
        assert_eq!(order.lock().as_slice(), &["item", "caller"]);
        assert_eq!(event.item.unwrap().name, "x");
    }
}
