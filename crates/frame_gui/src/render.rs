//! Per-viewer rendering
//!
//! Items stay blueprints until a [`PageRenderer`] turns them into
//! [`DisplayItem`]s for one viewer: placeholders, colors and small caps are
//! resolved against the session's style context merged with the item's own
//! overrides, at the last moment.

use crate::config::GuiSetting;
use crate::item::{GuiItem, ItemFlag};
use crate::page::PageStore;
use frame_core::{HandlerId, InventoryKey, PageId, IDS};
use frame_style::{StyleEngine, StyleSheet};
use frame_texture::{resolve_skull, ProfileCache, SkullOwner};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A rendered item, ready for the host
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub material: String,
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub amount: u32,
    pub glow: bool,
    pub flags: Vec<ItemFlag>,
    pub model: Option<i32>,
    pub skull: Option<SkullOwner>,
    pub enchantments: BTreeMap<String, u32>,
    pub unbreakable: bool,
    pub damage: Option<i32>,
}

/// A rendered page, identified by its key and owned by one GUI handler
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub key: InventoryKey,
    pub owner: HandlerId,
    pub page: PageId,
    pub title: String,
    pub size: usize,
    pub slots: Vec<Option<DisplayItem>>,
}

impl Inventory {
    /// True when no slot holds an item
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn item(&self, slot: usize) -> Option<&DisplayItem> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Display names by slot, for quick inspection
    pub fn names(&self) -> BTreeMap<usize, String> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| Some((slot, item.as_ref()?.name.clone()?)))
            .collect()
    }
}

/// Renders pages for one viewer
#[derive(Clone)]
pub struct PageRenderer {
    engine: Arc<dyn StyleEngine>,
    profiles: Arc<ProfileCache>,
    context: StyleSheet,
}

impl PageRenderer {
    /// `context` is deep-copied; later changes to the caller's sheet do not
    /// reach this renderer
    pub fn new(engine: Arc<dyn StyleEngine>, profiles: Arc<ProfileCache>, context: &StyleSheet) -> Self {
        Self {
            engine,
            profiles,
            context: context.clone(),
        }
    }

    pub fn context(&self) -> &StyleSheet {
        &self.context
    }

    /// Window title of `page`, with `{page}` replaced by its id
    pub fn title(&self, setting: &GuiSetting, page: PageId) -> String {
        let raw = setting.title.replace("{page}", &page.to_string());
        let context = self.context.merged(&setting.style);
        self.engine.apply_style(&raw, &context, setting.style.stylish.title)
    }

    /// Render one item; empty items render as nothing
    pub fn render_item(&self, item: &GuiItem, setting: &GuiSetting) -> Option<DisplayItem> {
        if item.is_empty() {
            return None;
        }
        let context = match &item.style {
            Some(style) => self.context.merged(style),
            None => self.context.clone(),
        };
        let stylish = setting.style.stylish;

        let name = item.current_name();
        let name = (!name.is_empty()).then(|| {
            self.engine
                .apply_style(&name, &context, item.small_caps_name.unwrap_or(stylish.name))
        });
        let lore = self.engine.apply_style_lines(
            &item.current_lore(),
            &context,
            item.small_caps_lore.unwrap_or(stylish.lore),
        );

        let skull = if item.is_textured_skull() {
            let viewer = context.viewer.as_ref().map(|v| v.id);
            item.texture
                .as_deref()
                .and_then(|texture| resolve_skull(texture, viewer, &self.profiles))
        } else {
            None
        };

        Some(DisplayItem {
            material: item.material.clone(),
            name,
            lore,
            amount: item.amount,
            glow: item.glow,
            flags: item.flags.clone(),
            model: item.model,
            skull,
            enchantments: item.enchantments.clone(),
            unbreakable: item.unbreakable,
            damage: item.damage,
        })
    }

    /// Render page `id` of `store` as an inventory owned by `owner`.
    ///
    /// Non-global pages get the global page's static items first, then
    /// their own items on top. Slots the page had an item removed from stay
    /// empty.
    pub fn render_page(&self, store: &PageStore, id: PageId, owner: HandlerId) -> Option<Inventory> {
        let page = store.page(id)?;
        let size = page.grid.size();
        let mut slots: Vec<Option<DisplayItem>> = vec![None; size];

        if !id.is_global() {
            if let Some(global) = store.global() {
                for (slot, item) in global.static_items() {
                    if slot < size && !page.cleared.contains(&slot) {
                        slots[slot] = self.render_item(item, &page.setting);
                    }
                }
            }
        }
        for (slot, item) in &page.items {
            if *slot < size {
                slots[*slot] = self.render_item(item, &page.setting);
            }
        }

        Some(Inventory {
            key: IDS.next_inventory(),
            owner,
            page: id,
            title: self.title(&page.setting, id),
            size,
            slots,
        })
    }
}

impl core::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("context", &self.context)
            .finish()
    }
}
