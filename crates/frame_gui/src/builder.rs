//! The chest GUI builder
//!
//! The builder is a blueprint. Top-level calls are recorded as
//! [`BuilderAction`]s and nothing touches a page until [`build`] runs them
//! in [`ActionKind`](crate::action::ActionKind) order. Inside a page block the
//! calls run immediately against that page through a [`PageScope`].
//!
//! ```ignore
//! let mut builder = ChestGuiBuilder::new(GuiSetting::new(6, "Shop {page}"));
//! builder.nav(|nav| nav.margin = 1);
//! builder.set_item_at(4, GuiItem::new("GOLD_INGOT", "&6Balance"));
//! builder.add_page(|page| {
//!     for offer in offers() {
//!         page.add_item(offer);
//!     }
//! });
//! let model = builder.build()?;
//! ```
//!
//! [`build`]: ChestGuiBuilder::build

use crate::action::{ActionQueue, BuilderAction, PageBlock};
use crate::buffer::BufferSettings;
use crate::config::GuiSetting;
use crate::event::{ClickEvent, ClickHandler, CloseEvent, CloseHandler, OpenEvent, OpenHandler};
use crate::item::GuiItem;
use crate::navigation::Navigation;
use crate::page::PageStore;
use frame_core::{FrameError, PageId, Result, SlotIndex};
use frame_style::StylishFlags;
use std::sync::Arc;

/// GUI-wide event handlers
#[derive(Default, Clone)]
pub struct GlobalHandlers {
    pub on_open: Option<OpenHandler>,
    pub on_close: Option<CloseHandler>,
    pub on_click: Option<ClickHandler>,
}

/// Everything a build produces
pub struct GuiModel {
    pub setting: GuiSetting,
    pub store: PageStore,
    pub globals: GlobalHandlers,
    pub buffer: Option<BufferSettings>,
    pub debugging: bool,
}

/// Builder for paginated chest GUIs
pub struct ChestGuiBuilder {
    setting: GuiSetting,
    actions: ActionQueue,
    navigation: Option<Navigation>,
    buffer: Option<BufferSettings>,
    debugging: bool,
}

impl ChestGuiBuilder {
    pub fn new(setting: GuiSetting) -> Self {
        Self {
            setting,
            actions: ActionQueue::new(),
            navigation: None,
            buffer: None,
            debugging: false,
        }
    }

    /// Setting pages fall back to
    pub fn setting(&self) -> &GuiSetting {
        &self.setting
    }

    /// Trace action execution at debug level
    pub fn debugging(&mut self, enabled: bool) -> &mut Self {
        self.debugging = enabled;
        self
    }

    // Global events

    /// Runs on the first open of this GUI per viewer
    pub fn on_open(&mut self, handler: impl Fn(&mut OpenEvent) + Send + Sync + 'static) -> &mut Self {
        self.actions.push(BuilderAction::GlobalOpen(Arc::new(handler)));
        self
    }

    /// Runs once the viewer has left the GUI
    pub fn on_close(&mut self, handler: impl Fn(&mut CloseEvent) + Send + Sync + 'static) -> &mut Self {
        self.actions.push(BuilderAction::GlobalClose(Arc::new(handler)));
        self
    }

    /// Runs on every click, after slot and page handlers
    pub fn on_click(&mut self, handler: impl Fn(&mut ClickEvent) + Send + Sync + 'static) -> &mut Self {
        self.actions.push(BuilderAction::GlobalClick(Arc::new(handler)));
        self
    }

    /// Runs whenever any page is opened. Pages with their own open handler
    /// keep it.
    pub fn on_page_open(&mut self, handler: impl Fn(&mut OpenEvent) + Send + Sync + 'static) -> &mut Self {
        self.actions.push(BuilderAction::PageOpen(Arc::new(handler)));
        self
    }

    /// Runs whenever any page is closed. Pages with their own close handler
    /// keep it.
    pub fn on_page_close(&mut self, handler: impl Fn(&mut CloseEvent) + Send + Sync + 'static) -> &mut Self {
        self.actions.push(BuilderAction::PageClose(Arc::new(handler)));
        self
    }

    // Items

    /// Add an item to the global page, overflowing into new pages.
    ///
    /// Items that land on the global page are not copied to other pages, and
    /// a GUI with content pages opens on the lowest one. Those first items are
    /// therefore only visible in a GUI with no content pages; use
    /// [`add_page`](Self::add_page) to put them on a page of their own.
    pub fn add_item(&mut self, item: GuiItem) -> &mut Self {
        self.actions.push(BuilderAction::AddItem { item, on_click: None });
        self
    }

    /// [`add_item`](Self::add_item) with a click callback
    pub fn add_item_with(
        &mut self,
        item: GuiItem,
        on_click: impl Fn(&mut ClickEvent) + Send + Sync + 'static,
    ) -> &mut Self {
        self.actions.push(BuilderAction::AddItem {
            item,
            on_click: Some(Arc::new(on_click)),
        });
        self
    }

    /// Add several items, sharing one click callback
    pub fn add_items<I>(&mut self, items: I, on_click: Option<ClickHandler>) -> &mut Self
    where
        I: IntoIterator<Item = GuiItem>,
    {
        for item in items {
            self.actions.push(BuilderAction::AddItem {
                item,
                on_click: on_click.clone(),
            });
        }
        self
    }

    /// Place an item on the global page at its own `slot` and `slots`
    pub fn set_item(&mut self, item: GuiItem) -> &mut Self {
        let mut slots: Vec<SlotIndex> = item.slot.into_iter().collect();
        slots.extend(item.slots.iter().copied());
        if slots.is_empty() {
            log::warn!("set_item called for '{}' without a slot; ignored", item.name);
            return self;
        }
        self.actions.push(BuilderAction::SetItem { slots, item });
        self
    }

    /// Place an item on the global page at `slot`
    pub fn set_item_at(&mut self, slot: SlotIndex, item: GuiItem) -> &mut Self {
        self.set_item_slots(vec![slot], item)
    }

    /// Place an item on the global page at every slot of `slots`
    pub fn set_item_slots(&mut self, slots: impl Into<Vec<SlotIndex>>, item: GuiItem) -> &mut Self {
        self.actions.push(BuilderAction::SetItem {
            slots: slots.into(),
            item,
        });
        self
    }

    /// Place previously saved contents on the global page
    pub fn load_inventory_contents<I>(&mut self, contents: I) -> &mut Self
    where
        I: IntoIterator<Item = (SlotIndex, GuiItem)>,
    {
        for (slot, item) in contents {
            self.set_item_at(slot, item);
        }
        self
    }

    // Pages

    /// Add a page with the next free id
    pub fn add_page(&mut self, block: impl FnOnce(&mut PageScope<'_>) + 'static) -> &mut Self {
        self.queue_page(None, None, Box::new(block))
    }

    /// Add a page with an explicit id
    pub fn add_page_with_id(
        &mut self,
        id: PageId,
        block: impl FnOnce(&mut PageScope<'_>) + 'static,
    ) -> &mut Self {
        self.queue_page(Some(id), None, Box::new(block))
    }

    /// Add a page with its own setting; `id` of `None` picks the next free id
    pub fn add_page_with_setting(
        &mut self,
        id: Option<PageId>,
        setting: GuiSetting,
        block: impl FnOnce(&mut PageScope<'_>) + 'static,
    ) -> &mut Self {
        self.queue_page(id, Some(setting), Box::new(block))
    }

    fn queue_page(&mut self, id: Option<PageId>, setting: Option<GuiSetting>, block: PageBlock) -> &mut Self {
        if self.debugging {
            match id {
                Some(id) => log::debug!("Queued page {}", id),
                None => log::debug!("Queued page with next free id"),
            }
        }
        self.actions.push(BuilderAction::AddPage { id, setting, block });
        self
    }

    /// Configure next/previous buttons. Enables navigation slot reservation.
    pub fn nav(&mut self, configure: impl FnOnce(&mut Navigation)) -> &mut Self {
        let mut navigation = self.navigation.take().unwrap_or_default();
        configure(&mut navigation);
        self.navigation = Some(navigation);
        self.actions.push(BuilderAction::Navigation);
        self
    }

    /// Render pages lazily in a sliding window
    pub fn buffer(&mut self, settings: BufferSettings) -> &mut Self {
        self.buffer = Some(settings);
        self
    }

    /// Run every recorded action and produce the page models
    pub fn build(self) -> Result<GuiModel> {
        let mut store = PageStore::new(self.setting.clone())?;
        store.debugging = self.debugging;
        let mut globals = GlobalHandlers::default();

        let mut actions = self.actions;
        actions.push(BuilderAction::Finalize);

        for action in actions.into_sorted() {
            if self.debugging {
                log::debug!("Executing {:?}", action);
            }
            match action {
                BuilderAction::Navigation => {
                    if let Some(navigation) = &self.navigation {
                        navigation.reserve(&mut store.reserved);
                    }
                }
                BuilderAction::GlobalOpen(handler) => globals.on_open = Some(handler),
                BuilderAction::GlobalClose(handler) => globals.on_close = Some(handler),
                BuilderAction::GlobalClick(handler) => globals.on_click = Some(handler),
                BuilderAction::AddItem { item, on_click } => {
                    if store.add_item(PageId::GLOBAL, &item, on_click).is_none() {
                        log::warn!("No room for '{}' on any page", item.name);
                    }
                }
                BuilderAction::SetItem { slots, item } => {
                    for slot in slots {
                        store.set_item(PageId::GLOBAL, slot, &item, None)?;
                    }
                }
                BuilderAction::AddPage { id, setting, block } => {
                    run_page(&mut store, &self.setting, id, setting, block)?;
                }
                BuilderAction::PageOpen(handler) => {
                    for page in store.pages_mut() {
                        page.on_open.get_or_insert_with(|| handler.clone());
                    }
                }
                BuilderAction::PageClose(handler) => {
                    for page in store.pages_mut() {
                        page.on_close.get_or_insert_with(|| handler.clone());
                    }
                }
                BuilderAction::Finalize => {
                    if let Some(navigation) = &self.navigation {
                        navigation.inject(&mut store)?;
                    }
                }
            }
        }

        if self.debugging {
            log::debug!("Built GUI '{}' with {} pages", self.setting.title, store.len());
        }

        Ok(GuiModel {
            setting: self.setting,
            store,
            globals,
            buffer: self.buffer,
            debugging: self.debugging,
        })
    }
}

fn page_setting(setting: Option<GuiSetting>, defaults: &GuiSetting) -> GuiSetting {
    match setting {
        Some(mut setting) => {
            if setting.style.is_empty(StylishFlags::default()) {
                setting.style = defaults.style.clone();
            }
            setting
        }
        None => defaults.clone(),
    }
}

fn run_page(
    store: &mut PageStore,
    defaults: &GuiSetting,
    id: Option<PageId>,
    setting: Option<GuiSetting>,
    block: PageBlock,
) -> Result<PageId> {
    let setting = page_setting(setting, defaults);
    let id = id.unwrap_or_else(|| store.next_page_id());
    if store.debugging {
        log::debug!("Starting execution of page {}", id);
    }
    store.create_page(id, setting)?;

    let mut errors = Vec::new();
    let mut scope = PageScope {
        store: &mut *store,
        defaults,
        page: id,
        errors: &mut errors,
    };
    block(&mut scope);

    if let Some(error) = errors.into_iter().next() {
        return Err(error);
    }
    if store.debugging {
        log::debug!("Finished execution of page {}", id);
    }
    Ok(id)
}

/// Calls available inside a page block; they apply to the page immediately
pub struct PageScope<'a> {
    store: &'a mut PageStore,
    defaults: &'a GuiSetting,
    page: PageId,
    errors: &'a mut Vec<FrameError>,
}

impl<'a> PageScope<'a> {
    /// Id of this page
    pub fn id(&self) -> PageId {
        self.page
    }

    /// Setting of this page
    pub fn setting(&self) -> Option<&GuiSetting> {
        self.store.page(self.page).map(|p| &p.setting)
    }

    /// Add an item in the first free slot, overflowing into new pages.
    /// Returns where it landed.
    pub fn add_item(&mut self, item: GuiItem) -> Option<(PageId, SlotIndex)> {
        self.store.add_item(self.page, &item, None)
    }

    pub fn add_item_with(
        &mut self,
        item: GuiItem,
        on_click: impl Fn(&mut ClickEvent) + Send + Sync + 'static,
    ) -> Option<(PageId, SlotIndex)> {
        self.store.add_item(self.page, &item, Some(Arc::new(on_click)))
    }

    /// Add several items sharing one click callback
    pub fn add_items<I>(&mut self, items: I, on_click: Option<ClickHandler>)
    where
        I: IntoIterator<Item = GuiItem>,
    {
        for item in items {
            self.store.add_item(self.page, &item, on_click.clone());
        }
    }

    /// Place an item at `slot`, ignoring reservation
    pub fn set_item(&mut self, slot: SlotIndex, item: GuiItem) -> Result<SlotIndex> {
        self.store.set_item(self.page, slot, &item, None)
    }

    pub fn set_item_with(
        &mut self,
        slot: SlotIndex,
        item: GuiItem,
        on_click: impl Fn(&mut ClickEvent) + Send + Sync + 'static,
    ) -> Result<SlotIndex> {
        self.store.set_item(self.page, slot, &item, Some(Arc::new(on_click)))
    }

    /// Remove the item at `slot`, compacting dynamic items
    pub fn remove(&mut self, slot: SlotIndex) -> &mut Self {
        self.store.remove(self.page, slot);
        self
    }

    pub fn remove_slots(&mut self, slots: &[SlotIndex]) -> &mut Self {
        self.store.remove_slots(self.page, slots);
        self
    }

    /// Add another page right away, with the next free id
    pub fn add_page(&mut self, block: impl FnOnce(&mut PageScope<'_>) + 'static) -> Option<PageId> {
        self.nested(None, None, Box::new(block))
    }

    pub fn add_page_with_id(
        &mut self,
        id: PageId,
        block: impl FnOnce(&mut PageScope<'_>) + 'static,
    ) -> Option<PageId> {
        self.nested(Some(id), None, Box::new(block))
    }

    pub fn add_page_with_setting(
        &mut self,
        id: Option<PageId>,
        setting: GuiSetting,
        block: impl FnOnce(&mut PageScope<'_>) + 'static,
    ) -> Option<PageId> {
        self.nested(id, Some(setting), Box::new(block))
    }

    fn nested(&mut self, id: Option<PageId>, setting: Option<GuiSetting>, block: PageBlock) -> Option<PageId> {
        match run_page(self.store, self.defaults, id, setting, block) {
            Ok(id) => Some(id),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// Navigation belongs to the top-level builder; calling this fails the build
    pub fn nav(&mut self, _configure: impl FnOnce(&mut Navigation)) {
        self.errors.push(FrameError::NavigationInNestedPage(self.page));
    }

    pub fn on_open(&mut self, handler: impl Fn(&mut OpenEvent) + Send + Sync + 'static) {
        if let Some(page) = self.store.page_mut(self.page) {
            page.on_open = Some(Arc::new(handler));
        }
    }

    pub fn on_close(&mut self, handler: impl Fn(&mut CloseEvent) + Send + Sync + 'static) {
        if let Some(page) = self.store.page_mut(self.page) {
            page.on_close = Some(Arc::new(handler));
        }
    }

    /// Runs on every click on this page, after the slot handler
    pub fn on_click(&mut self, handler: impl Fn(&mut ClickEvent) + Send + Sync + 'static) {
        if let Some(page) = self.store.page_mut(self.page) {
            page.on_click = Some(Arc::new(handler));
        }
    }
}
