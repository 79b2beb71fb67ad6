//! Saved items and inventories
//!
//! An inventory section holds the setting next to an items table keyed by
//! slot:
//!
//! ```toml
//! [shop]
//! title = "&6Shop"
//! rows = 3
//! font-title = true
//! open-sound = "BLOCK_CHEST_OPEN"
//!
//! [shop.items.0]
//! material = "GRAY_STAINED_GLASS_PANE"
//! name = " "
//! slots = [0, 1, 2, 6, 7, 8]
//!
//! [shop.items.4]
//! material = "EMERALD"
//! name = "&aBuy"
//! slot = 4
//! ```
//!
//! Identical items share one entry with a slot list.

use crate::document::ConfigDocument;
use crate::error::Result;
use crate::item_codec::{sound_value, ItemCodec};
use crate::keys::ConfigKeys;
use frame_audio::{GuiSound, SoundRegistry};
use frame_core::{SlotIndex, SLOTS_PER_ROW};
use frame_gui::{EventSounds, GuiItem, GuiSetting};
use frame_style::StylishFlags;
use toml::{Table, Value};

/// GUI contents stored in a [`ConfigDocument`]
#[derive(Debug, Clone)]
pub struct ConfigStore {
    document: ConfigDocument,
    keys: ConfigKeys,
    sounds: SoundRegistry,
    stylish: StylishFlags,
}

/// Entries of an items table, in numeric slot order
fn by_slot(items: &Table) -> Vec<(&String, &Table)> {
    let mut entries: Vec<_> = items
        .iter()
        .filter_map(|(key, value)| Some((key, value.as_table()?)))
        .collect();
    entries.sort_by_key(|(key, _)| (key.parse::<SlotIndex>().unwrap_or(SlotIndex::MAX), key.to_string()));
    entries
}

impl ConfigStore {
    pub fn new(document: ConfigDocument, keys: ConfigKeys) -> Self {
        Self {
            document,
            keys,
            sounds: SoundRegistry::new(),
            stylish: StylishFlags::default(),
        }
    }

    /// Resolve sound ids through `sounds`
    pub fn with_sounds(mut self, sounds: SoundRegistry) -> Self {
        self.sounds = sounds;
        self
    }

    /// Small caps defaults for settings that do not name them
    pub fn with_stylish(mut self, stylish: StylishFlags) -> Self {
        self.stylish = stylish;
        self
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ConfigDocument {
        &mut self.document
    }

    pub fn keys(&self) -> &ConfigKeys {
        &self.keys
    }

    /// Re-read the backing file
    pub fn reload(&mut self) -> Result<bool> {
        self.document.reload()
    }

    fn codec(&self) -> ItemCodec<'_> {
        ItemCodec::new(&self.keys, &self.sounds)
    }

    /// Item stored at `path`
    pub fn load_item(&self, path: &str) -> Option<GuiItem> {
        self.document.table(path).map(|table| self.codec().read(table))
    }

    /// Store `item` at `path`, replacing what was there
    pub fn save_item(&mut self, path: &str, item: &GuiItem) -> Result<()> {
        let table = self.codec().write(item);
        *self.document.create_section(path)? = table;
        self.document.save()
    }

    /// Items of the items table under `path`. Entries without a slot get the
    /// slot their key names.
    pub fn load_items(&self, path: &str) -> Vec<GuiItem> {
        let Some(items) = self
            .document
            .table(path)
            .and_then(|section| section.get(&self.keys.inventory_items))
            .and_then(Value::as_table)
        else {
            return Vec::new();
        };

        let codec = self.codec();
        by_slot(items)
            .into_iter()
            .map(|(key, table)| {
                let mut item = codec.read(table);
                if item.slot.is_none() && item.slots.is_empty() {
                    item.slot = key.parse().ok();
                }
                item
            })
            .collect()
    }

    fn items_table(&self, items: &[GuiItem]) -> Table {
        let mut groups: Vec<(GuiItem, Vec<SlotIndex>)> = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let mut slots: Vec<SlotIndex> = item.slot.into_iter().chain(item.slots.iter().copied()).collect();
            if slots.is_empty() {
                slots.push(index);
            }
            match groups.iter_mut().find(|(seen, _)| seen.same_look(item)) {
                Some((_, existing)) => existing.extend(slots),
                None => groups.push((item.clone(), slots)),
            }
        }

        let codec = self.codec();
        let mut table = Table::new();
        for (mut item, mut slots) in groups {
            slots.dedup();
            let key = slots[0].to_string();
            item.slot = None;
            item.slots.clear();
            if slots.len() == 1 {
                item.slot = Some(slots[0]);
            } else {
                item.slots = slots;
            }
            table.insert(key, Value::Table(codec.write(&item)));
        }
        table
    }

    /// Store `items` under `path`, grouping identical items into one entry
    pub fn save_items(&mut self, path: &str, items: &[GuiItem]) -> Result<()> {
        let table = self.items_table(items);
        self.document
            .section_mut(path)?
            .insert(self.keys.inventory_items.clone(), Value::Table(table));
        self.document.save()
    }

    /// Setting stored at `path`, or the default title and rows
    pub fn load_inventory_setting(&self, path: &str) -> GuiSetting {
        let keys = &self.keys;
        let mut setting = GuiSetting::new(keys.default_rows, keys.default_title.clone());
        setting.style.stylish = self.stylish;
        let Some(section) = self.document.table(path) else {
            return setting;
        };

        if let Some(title) = section.get(&keys.inventory_title).and_then(Value::as_str) {
            setting.title = title.to_string();
        }
        if let Some(rows) = section
            .get(&keys.inventory_rows)
            .and_then(Value::as_integer)
            .and_then(|n| usize::try_from(n).ok())
        {
            setting.rows = rows;
        }

        let flag = |key: &str, default: bool| section.get(key).and_then(Value::as_bool).unwrap_or(default);
        setting.style.stylish = StylishFlags {
            title: flag(&keys.font_title, self.stylish.title),
            name: flag(&keys.font_name, self.stylish.name),
            lore: flag(&keys.font_lore, self.stylish.lore),
        };

        let codec = self.codec();
        let sound = |key: &str| {
            section
                .get(key)
                .and_then(|v| codec.read_sound(v))
                .unwrap_or_else(GuiSound::none)
        };
        setting.sounds = EventSounds {
            click: sound(&keys.click_sound),
            open: sound(&keys.open_sound),
            close: sound(&keys.close_sound),
        };
        setting
    }

    fn write_setting(&mut self, path: &str, setting: &GuiSetting) -> Result<()> {
        let keys = self.keys.clone();
        let section = self.document.section_mut(path)?;
        let mut put = |key: &str, value: Value| {
            section.insert(key.to_string(), value);
        };
        put(&keys.inventory_title, setting.title.clone().into());
        put(&keys.inventory_rows, (setting.rows as i64).into());
        put(&keys.font_title, setting.style.stylish.title.into());
        put(&keys.font_name, setting.style.stylish.name.into());
        put(&keys.font_lore, setting.style.stylish.lore.into());
        for (key, sound) in [
            (&keys.click_sound, &setting.sounds.click),
            (&keys.open_sound, &setting.sounds.open),
            (&keys.close_sound, &setting.sounds.close),
        ] {
            if let Some(value) = sound_value(sound) {
                put(key, value);
            }
        }
        Ok(())
    }

    /// Store rows, title, small caps flags and sounds of `setting` at `path`
    pub fn save_inventory_setting(&mut self, path: &str, setting: &GuiSetting) -> Result<()> {
        self.write_setting(path, setting)?;
        self.document.save()
    }

    /// Setting and slot contents stored at `path`, ready for
    /// `ChestGuiBuilder::load_inventory_contents`. Slots outside the grid
    /// are skipped.
    pub fn load_inventory(&self, path: &str) -> Option<(GuiSetting, Vec<(SlotIndex, GuiItem)>)> {
        self.document.table(path)?;
        let setting = self.load_inventory_setting(path);
        let size = setting.rows * SLOTS_PER_ROW;

        let mut contents = Vec::new();
        for mut item in self.load_items(path) {
            let slots: Vec<SlotIndex> = item.slot.take().into_iter().chain(item.slots.drain(..)).collect();
            for slot in slots {
                if slot < size {
                    contents.push((slot, item.clone()));
                } else {
                    log::warn!("Skipping '{}' at slot {} outside {} slots in {}", item.name, slot, size, path);
                }
            }
        }
        contents.sort_by_key(|(slot, _)| *slot);
        Some((setting, contents))
    }

    /// Store `setting` and the slot contents at `path`
    pub fn save_inventory(&mut self, path: &str, setting: &GuiSetting, contents: &[(SlotIndex, GuiItem)]) -> Result<()> {
        let items: Vec<GuiItem> = contents
            .iter()
            .map(|(slot, item)| {
                let mut item = item.clone();
                item.slot = Some(*slot);
                item.slots.clear();
                item
            })
            .collect();
        let table = self.items_table(&items);

        self.document.create_section(path)?;
        self.write_setting(path, setting)?;
        self.document
            .section_mut(path)?
            .insert(self.keys.inventory_items.clone(), Value::Table(table));
        self.document.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfigStore {
        ConfigStore::new(ConfigDocument::new(), ConfigKeys::default())
    }

    #[test]
    fn test_missing_setting_uses_defaults() {
        let setting = store().load_inventory_setting("nowhere");
        assert_eq!(setting.rows, 6);
        assert_eq!(setting.title, "Slotframe Inventory");
        assert!(setting.sounds.click.is_empty());
    }

    #[test]
    fn test_identical_items_share_an_entry() {
        let mut store = store();
        let pane = GuiItem::new("GLASS_PANE", " ");
        let items = vec![
            pane.clone().with_slot(0),
            pane.clone().with_slot(8),
            GuiItem::new("EMERALD", "Buy").with_slot(4),
        ];
        store.save_items("shop", &items).unwrap();

        let table = store.document().table("shop.items").unwrap();
        assert_eq!(table.len(), 2);
        let grouped = store.document().get("shop.items.0.slots").and_then(Value::as_array).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(store.document().get("shop.items.4.slot").and_then(Value::as_integer), Some(4));

        let loaded = store.load_items("shop");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].slots, vec![0, 8]);
        assert_eq!(loaded[1].slot, Some(4));
    }

    #[test]
    fn test_items_without_slot_use_position() {
        let mut store = store();
        store
            .save_items("list", &[GuiItem::new("STONE", "a"), GuiItem::new("DIRT", "b")])
            .unwrap();
        let loaded = store.load_items("list");
        assert_eq!(loaded.iter().map(|i| i.slot).collect::<Vec<_>>(), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_numeric_slot_order() {
        let doc = ConfigDocument::parse(
            r#"
            [menu.items.10]
            material = "B"
            [menu.items.2]
            material = "A"
            "#,
        )
        .unwrap();
        let store = ConfigStore::new(doc, ConfigKeys::default());
        let loaded = store.load_items("menu");
        assert_eq!(loaded[0].material, "A");
        assert_eq!(loaded[0].slot, Some(2));
        assert_eq!(loaded[1].slot, Some(10));
    }

    #[test]
    fn test_inventory_contents_expand_slot_lists() {
        let mut store = store();
        let setting = GuiSetting::new(1, "Row");
        let pane = GuiItem::new("GLASS_PANE", " ");
        store
            .save_inventory("row", &setting, &[(0, pane.clone()), (8, pane), (20, GuiItem::new("X", "x"))])
            .unwrap();

        let (loaded, contents) = store.load_inventory("row").unwrap();
        assert_eq!(loaded.rows, 1);
        let slots: Vec<SlotIndex> = contents.iter().map(|(slot, _)| *slot).collect();
        assert_eq!(slots, vec![0, 8]);
        assert!(contents.iter().all(|(_, item)| item.slot.is_none() && item.slots.is_empty()));
        assert!(store.load_inventory("missing").is_none());
    }
}
