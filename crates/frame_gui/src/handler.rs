//! The GUI event handler
//!
//! One [`GuiHandler`] exists per opened blueprint. It owns the page models,
//! the rendered inventories and every callback, and it is the identity the
//! host uses to route events: each inventory it renders carries its
//! [`HandlerId`].
//!
//! Dispatch never re-enters the handler. Callbacks queue
//! [`GuiCommand`]s on their event and the handler applies them after the
//! callbacks have returned.

use crate::buffer::BufferSettings;
use crate::builder::{GlobalHandlers, GuiModel};
use crate::config::{EventSounds, GuiSetting};
use crate::event::{ClickEvent, ClickType, CloseEvent, GuiCommand, OpenEvent};
use crate::host::Host;
use crate::page::PageStore;
use crate::perf;
use crate::render::{Inventory, PageRenderer};
use frame_core::{HandlerId, InventoryKey, PageId, SlotIndex, ViewerId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Result of a click dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// The host should cancel the click
    pub cancelled: bool,
    /// The click reached a GUI page
    pub handled: bool,
}

/// Runtime state of one opened GUI
pub struct GuiHandler {
    id: HandlerId,
    setting: GuiSetting,
    store: PageStore,
    globals: GlobalHandlers,
    renderer: PageRenderer,
    sounds: EventSounds,
    buffer: Option<BufferSettings>,
    debugging: bool,
    inventories: BTreeMap<PageId, Inventory>,
    current_pages: HashMap<ViewerId, PageId>,
    triggered_open: HashSet<ViewerId>,
}

impl GuiHandler {
    /// Wrap built page models. Nothing is rendered yet.
    pub fn new(id: HandlerId, model: GuiModel, renderer: PageRenderer, default_sounds: &EventSounds) -> Self {
        let sounds = model.setting.sounds.clone().or(default_sounds);
        Self {
            id,
            setting: model.setting,
            store: model.store,
            globals: model.globals,
            renderer,
            sounds,
            buffer: model.buffer,
            debugging: model.debugging,
            inventories: BTreeMap::new(),
            current_pages: HashMap::new(),
            triggered_open: HashSet::new(),
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn setting(&self) -> &GuiSetting {
        &self.setting
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn sounds(&self) -> &EventSounds {
        &self.sounds
    }

    pub fn buffer(&self) -> Option<&BufferSettings> {
        self.buffer.as_ref()
    }

    /// Rendered inventory of `page`
    pub fn inventory(&self, page: PageId) -> Option<&Inventory> {
        self.inventories.get(&page)
    }

    /// Ids of pages that currently have a rendered inventory
    pub fn rendered_pages(&self) -> Vec<PageId> {
        self.inventories.keys().copied().collect()
    }

    /// Page `viewer` is on
    pub fn current_page(&self, viewer: ViewerId) -> Option<PageId> {
        self.current_pages.get(&viewer).copied()
    }

    /// Viewers currently tracked
    pub fn viewer_count(&self) -> usize {
        self.current_pages.len()
    }

    /// True when `key` is one of this handler's inventories
    pub fn owns(&self, key: InventoryKey) -> bool {
        self.inventories.values().any(|inv| inv.key == key)
    }

    /// Page to open first: `requested`, else the lowest non-global page, else
    /// the global page
    pub fn initial_page(&self, requested: Option<PageId>) -> PageId {
        requested
            .or_else(|| self.store.content_ids().first().copied())
            .unwrap_or(PageId::GLOBAL)
    }

    fn render(&mut self, page: PageId) {
        if let Some(inventory) = self.renderer.render_page(&self.store, page, self.id) {
            self.inventories.insert(page, inventory);
        }
    }

    /// Render `page` again, keeping its inventory key
    fn rerender(&mut self, page: PageId) {
        let key = self.inventories.get(&page).map(|inv| inv.key);
        if let Some(mut inventory) = self.renderer.render_page(&self.store, page, self.id) {
            if let Some(key) = key {
                inventory.key = key;
            }
            self.inventories.insert(page, inventory);
        }
    }

    /// Render the pages a session starts with: everything without a buffer,
    /// otherwise the global page, `initial` and its neighbours
    pub fn render_initial(&mut self, initial: PageId) {
        let Some(buffer) = self.buffer else {
            perf::measure("full pages", || {
                let ids: Vec<PageId> = self.store.ids().collect();
                for id in ids {
                    self.render(id);
                }
            });
            return;
        };

        perf::measure("lazy pages", || {
            let ids = self.store.content_ids();
            let mut wanted = vec![PageId::GLOBAL, initial];
            if let Some(index) = ids.iter().position(|&id| id == initial) {
                wanted.extend(buffer.initial(index, ids.len()).into_iter().map(|i| ids[i]));
            }
            for id in wanted {
                if !self.inventories.contains_key(&id) {
                    self.render(id);
                }
            }
        });
    }

    fn buffer_page(&mut self, buffer: BufferSettings, page: PageId) {
        let ids = self.store.content_ids();
        let Some(index) = ids.iter().position(|&id| id == page) else {
            return;
        };
        let rendered: BTreeSet<usize> = ids
            .iter()
            .enumerate()
            .filter(|(_, id)| self.inventories.get(*id).is_some_and(|inv| !inv.is_empty()))
            .map(|(i, _)| i)
            .collect();

        let plan = buffer.plan(index, ids.len(), &rendered);
        if self.debugging {
            log::debug!("Buffer plan for page {}: {:?}", page, plan);
        }
        for i in plan.render {
            self.render(ids[i]);
        }
        let viewed: HashSet<PageId> = self.current_pages.values().copied().collect();
        for i in plan.evict {
            if !viewed.contains(&ids[i]) {
                self.inventories.remove(&ids[i]);
            }
        }
        if !self.inventories.contains_key(&page) {
            self.render(page);
        }
        if !self.inventories.contains_key(&PageId::GLOBAL) {
            self.render(PageId::GLOBAL);
        }
    }

    /// Show `page` to `viewer`. Returns false when the page has no inventory.
    pub fn open(&mut self, viewer: ViewerId, page: PageId, host: &mut dyn Host) -> bool {
        if let Some(buffer) = self.buffer {
            perf::measure("buffer page", || self.buffer_page(buffer, page));
        }
        let Some(inventory) = self.inventories.get(&page) else {
            log::debug!("GUI {} has no inventory for page {}", self.id, page);
            return false;
        };
        self.current_pages.insert(viewer, page);
        host.open_inventory(viewer, inventory);
        true
    }

    /// Host callback: one of this GUI's inventories was opened
    pub fn on_open(&mut self, viewer: ViewerId, host: &mut dyn Host) {
        let page = self.current_page(viewer);
        let mut event = OpenEvent::new(viewer, page.unwrap_or(PageId::GLOBAL));

        if let Some(handler) = page.and_then(|p| self.store.page(p)).and_then(|p| p.on_open.clone()) {
            handler(&mut event);
        }

        if self.triggered_open.insert(viewer) {
            if let Some(handler) = self.globals.on_open.clone() {
                handler(&mut event);
            }
            self.sounds.open.play(viewer, &mut *host);
        }

        self.apply(viewer, event.commands, host);
    }

    /// Host callback: a slot of one of this GUI's inventories was clicked.
    ///
    /// Slot, page and global handlers all run, in that order, whatever the
    /// earlier ones did to the event.
    pub fn on_click(&mut self, viewer: ViewerId, slot: SlotIndex, click: ClickType, host: &mut dyn Host) -> ClickOutcome {
        let Some(page) = self.current_page(viewer) else {
            return ClickOutcome::default();
        };
        let mut event = ClickEvent::new(viewer, page, slot, click);
        event.bounds = self.store.bounds();

        let (slot_handler, page_handler) = self
            .store
            .page(page)
            .map(|p| (p.click_handlers.get(&slot).cloned(), p.on_click.clone()))
            .unwrap_or((None, None));

        if let Some(handler) = slot_handler {
            handler(&mut event);
        }
        if let Some(handler) = page_handler {
            handler(&mut event);
        }
        if let Some(handler) = self.globals.on_click.clone() {
            handler(&mut event);
        }

        let sound = event
            .item
            .as_ref()
            .and_then(|item| item.click_sound.clone())
            .filter(|sound| !sound.is_empty())
            .unwrap_or_else(|| self.sounds.click.clone());
        sound.play(viewer, &mut *host);

        let outcome = ClickOutcome {
            cancelled: event.cancelled,
            handled: true,
        };
        self.apply(viewer, event.commands, host);
        outcome
    }

    /// Host callback: the viewer closed one of this GUI's inventories.
    ///
    /// Runs the page close handler. The host must call [`complete_close`]
    /// on the next tick.
    ///
    /// [`complete_close`]: Self::complete_close
    pub fn on_close(&mut self, viewer: ViewerId, host: &mut dyn Host) {
        let page = self.current_page(viewer);
        let mut event = CloseEvent::new(viewer, page);
        if let Some(handler) = page.and_then(|p| self.store.page(p)).and_then(|p| p.on_close.clone()) {
            handler(&mut event);
        }
        self.apply(viewer, event.commands, host);
    }

    /// Deferred half of a close. If the viewer has moved to another of our
    /// inventories nothing happens; otherwise the global close handler runs,
    /// tracking is dropped and the close sound plays. Returns true when the
    /// viewer left.
    pub fn complete_close(&mut self, viewer: ViewerId, host: &mut dyn Host) -> bool {
        if host.top_inventory(viewer).is_some_and(|key| self.owns(key)) {
            return false;
        }
        let mut event = CloseEvent::new(viewer, self.current_page(viewer));
        if let Some(handler) = self.globals.on_close.clone() {
            handler(&mut event);
        }
        self.current_pages.remove(&viewer);
        self.triggered_open.remove(&viewer);
        self.sounds.close.play(viewer, &mut *host);
        self.apply(viewer, event.commands, host);
        true
    }

    /// Remove the item at `slot` of `page` and refresh what viewers see
    pub fn remove_item(&mut self, page: PageId, slot: SlotIndex, host: &mut dyn Host) {
        self.store.remove(page, slot);
        let rendered = self.rendered_pages();
        for id in &rendered {
            self.rerender(*id);
        }
        for (viewer, current) in &self.current_pages {
            if let Some(inventory) = self.inventories.get(current) {
                host.refresh_inventory(*viewer, inventory);
            }
        }
    }

    fn apply(&mut self, viewer: ViewerId, commands: Vec<GuiCommand>, host: &mut dyn Host) {
        for command in commands {
            match command {
                GuiCommand::OpenPage(page) => {
                    self.open(viewer, page, host);
                }
                GuiCommand::SendMessage(message) => host.send_message(viewer, &message),
                GuiCommand::Close => host.close_inventory(viewer),
                GuiCommand::RemoveItem { page, slot } => self.remove_item(page, slot, host),
            }
        }
    }
}

impl core::fmt::Debug for GuiHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuiHandler")
            .field("id", &self.id)
            .field("title", &self.setting.title)
            .field("pages", &self.store.len())
            .field("rendered", &self.inventories.len())
            .field("viewers", &self.current_pages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ChestGuiBuilder;
    use crate::host::RecordingHost;
    use crate::item::GuiItem;
    use frame_audio::GuiSound;
    use frame_core::IDS;
    use frame_style::{DefaultStyleEngine, StyleSheet, Viewer};
    use frame_texture::{ProfileCache, ProfileCapability};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn handler(builder: ChestGuiBuilder, viewer: ViewerId) -> GuiHandler {
        let renderer = PageRenderer::new(
            Arc::new(DefaultStyleEngine::default()),
            Arc::new(ProfileCache::new(ProfileCapability::PlayerProfiles)),
            &StyleSheet::new().with_viewer(Viewer::new(viewer, "Alex")),
        );
        let defaults = EventSounds {
            click: GuiSound::cue("CLICK"),
            open: GuiSound::cue("OPEN"),
            close: GuiSound::cue("CLOSE"),
        };
        GuiHandler::new(IDS.next_handler(), builder.build().unwrap(), renderer, &defaults)
    }

    fn three_pages() -> ChestGuiBuilder {
        let mut builder = ChestGuiBuilder::new(GuiSetting::new(1, "Page {page}"));
        for i in 1..=3 {
            builder.add_page(move |page| {
                page.add_item(GuiItem::new("PAPER", format!("item {i}")));
            });
        }
        builder
    }

    #[test]
    fn test_initial_page_selection() {
        let viewer = ViewerId::random();
        let gui = handler(three_pages(), viewer);
        assert_eq!(gui.initial_page(None), PageId(1));
        assert_eq!(gui.initial_page(Some(PageId(3))), PageId(3));

        let only_global = handler(ChestGuiBuilder::new(GuiSetting::new(1, "")), viewer);
        assert_eq!(only_global.initial_page(None), PageId::GLOBAL);
    }

    #[test]
    fn test_open_tracks_page() {
        let viewer = ViewerId::random();
        let mut host = RecordingHost::new();
        let mut gui = handler(three_pages(), viewer);
        gui.render_initial(PageId(1));
        assert!(gui.open(viewer, PageId(2), &mut host));
        assert_eq!(gui.current_page(viewer), Some(PageId(2)));
        assert_eq!(host.last_opened(viewer).unwrap().title, "Page 2");
        assert!(!gui.open(viewer, PageId(9), &mut host));
        assert_eq!(gui.current_page(viewer), Some(PageId(2)));
    }

    #[test]
    fn test_open_sound_only_first_time() {
        let viewer = ViewerId::random();
        let mut host = RecordingHost::new();
        let mut gui = handler(three_pages(), viewer);
        gui.render_initial(PageId(1));
        gui.open(viewer, PageId(1), &mut host);
        gui.on_open(viewer, &mut host);
        gui.open(viewer, PageId(2), &mut host);
        gui.on_open(viewer, &mut host);
        assert_eq!(host.sounds_for(viewer), vec!["OPEN"]);
    }

    #[test]
    fn test_click_dispatch_order_and_sound() {
        let viewer = ViewerId::random();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (order.clone(), order.clone(), order.clone());
        let mut builder = ChestGuiBuilder::new(GuiSetting::new(1, ""));
        builder.on_click(move |_| a.lock().push("global"));
        builder.add_page(move |page| {
            page.on_click(move |_| b.lock().push("page"));
            let item = GuiItem::new("BELL", "ring").with_click_sound(GuiSound::cue("DING"));
            page.add_item_with(item, move |e| {
                e.cancel();
                c.lock().push("slot");
            });
        });
        let mut host = RecordingHost::new();
        let mut gui = handler(builder, viewer);
        gui.render_initial(PageId(1));
        gui.open(viewer, PageId(1), &mut host);

        let outcome = gui.on_click(viewer, 0, ClickType::Left, &mut host);
        assert!(outcome.cancelled && outcome.handled);
        assert_eq!(order.lock().as_slice(), &["slot", "page", "global"]);
        assert_eq!(host.sounds_for(viewer), vec!["DING"]);

        let outcome = gui.on_click(viewer, 5, ClickType::Right, &mut host);
        assert!(!outcome.cancelled);
        assert_eq!(host.sounds_for(viewer), vec!["DING", "CLICK"]);
    }

    #[test]
    fn test_click_without_page_is_ignored() {
        let mut host = RecordingHost::new();
        let mut gui = handler(three_pages(), ViewerId::random());
        let outcome = gui.on_click(ViewerId::random(), 0, ClickType::Left, &mut host);
        assert_eq!(outcome, ClickOutcome::default());
        assert!(host.sounds.is_empty());
    }

    #[test]
    fn test_close_deferred_until_viewer_leaves() {
        let viewer = ViewerId::random();
        let closed = Arc::new(Mutex::new(0));
        let counter = closed.clone();
        let mut builder = three_pages();
        builder.on_close(move |_| *counter.lock() += 1);
        let mut host = RecordingHost::new();
        let mut gui = handler(builder, viewer);
        gui.render_initial(PageId(1));
        gui.open(viewer, PageId(1), &mut host);

        // switching pages closes the old inventory, but the viewer stays
        gui.on_close(viewer, &mut host);
        gui.open(viewer, PageId(2), &mut host);
        assert!(!gui.complete_close(viewer, &mut host));
        assert_eq!(*closed.lock(), 0);

        gui.on_close(viewer, &mut host);
        host.set_top_inventory(viewer, None);
        assert!(gui.complete_close(viewer, &mut host));
        assert_eq!(*closed.lock(), 1);
        assert_eq!(gui.viewer_count(), 0);
        assert_eq!(host.sounds_for(viewer), vec!["CLOSE"]);
    }

    #[test]
    fn test_remove_command_rerenders_in_place() {
        let viewer = ViewerId::random();
        let mut builder = ChestGuiBuilder::new(GuiSetting::new(1, ""));
        builder.add_page(|page| {
            for name in ["a", "b", "c"] {
                page.add_item_with(GuiItem::new("PAPER", name), |e| e.remove_item());
            }
        });
        let mut host = RecordingHost::new();
        let mut gui = handler(builder, viewer);
        gui.render_initial(PageId(1));
        gui.open(viewer, PageId(1), &mut host);
        let key = gui.inventory(PageId(1)).unwrap().key;

        gui.on_click(viewer, 0, ClickType::Left, &mut host);
        let inventory = gui.inventory(PageId(1)).unwrap();
        assert_eq!(inventory.key, key);
        assert_eq!(
            inventory.names().into_values().collect::<Vec<_>>(),
            vec!["b".to_string(), "c".to_string()]
        );
        assert_eq!(host.refreshed.len(), 1);
    }

    #[test]
    fn test_removed_inherited_item_stays_removed() {
        let viewer = ViewerId::random();
        let mut builder = ChestGuiBuilder::new(GuiSetting::new(1, ""));
        builder.set_item_at(4, GuiItem::new("GLASS", "border"));
        builder.add_page(|page| {
            page.on_click(|e| {
                if e.slot == 4 {
                    e.remove_item();
                }
            });
        });
        let mut host = RecordingHost::new();
        let mut gui = handler(builder, viewer);
        gui.render_initial(PageId(1));
        gui.open(viewer, PageId(1), &mut host);
        assert!(gui.inventory(PageId(1)).unwrap().item(4).is_some());

        gui.on_click(viewer, 4, ClickType::Left, &mut host);
        let page = gui.store().page(PageId(1)).unwrap();
        assert!(!page.items.contains_key(&4));
        assert!(!page.click_handlers.contains_key(&4));
        assert!(gui.inventory(PageId(1)).unwrap().item(4).is_none());
        assert!(host.refreshed.last().unwrap().1.item(4).is_none());
        // the global page keeps its own copy
        assert!(gui.inventory(PageId::GLOBAL).unwrap().item(4).is_some());
    }

    #[test]
    fn test_navigation_at_bounds_keeps_page() {
        let viewer = ViewerId::random();
        let mut builder = ChestGuiBuilder::new(GuiSetting::new(1, "Page {page}"));
        builder.add_page(|page| {
            let back = crate::navigation::previous_page();
            page.set_item_with(0, GuiItem::new("ARROW", "back"), move |e| back(e)).unwrap();
        });
        builder.add_page(|page| {
            let forward = crate::navigation::next_page();
            page.set_item_with(8, GuiItem::new("ARROW", "forward"), move |e| forward(e)).unwrap();
        });
        let mut host = RecordingHost::new();
        let mut gui = handler(builder, viewer);
        gui.render_initial(PageId(1));
        gui.open(viewer, PageId(1), &mut host);

        gui.on_click(viewer, 0, ClickType::Left, &mut host);
        assert_eq!(gui.current_page(viewer), Some(PageId(1)));
        assert_eq!(host.opened.len(), 1);
        assert_eq!(host.messages_for(viewer), vec![crate::navigation::FIRST_PAGE_MESSAGE]);

        gui.open(viewer, PageId(2), &mut host);
        gui.on_click(viewer, 8, ClickType::Left, &mut host);
        assert_eq!(gui.current_page(viewer), Some(PageId(2)));
        assert_eq!(host.opened.len(), 2);
        assert_eq!(
            host.messages_for(viewer),
            vec![crate::navigation::FIRST_PAGE_MESSAGE, crate::navigation::LAST_PAGE_MESSAGE]
        );
    }
}
