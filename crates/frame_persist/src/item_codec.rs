//! Item tables
//!
//! ```toml
//! material = "DIAMOND_SWORD"
//! name = "&bBlade"
//! lore = ["&7Sharp"]
//! glow = true
//! flags = ["HIDE_ATTRIBUTES"]
//! click-sound = "ENTITY_PLAYER_LEVELUP, 1.5p"
//!
//! [enchantments]
//! SHARPNESS = 5
//! ```
//!
//! Reading never fails: malformed entries fall back to their defaults and
//! are logged.

use crate::keys::ConfigKeys;
use frame_audio::{GuiSound, SoundRegistry};
use frame_gui::{GuiItem, ItemFlag, AIR};
use frame_style::StyleSheet;
use toml::{Table, Value};

/// Encodes [`GuiItem`]s as TOML tables
#[derive(Debug, Clone, Copy)]
pub struct ItemCodec<'a> {
    keys: &'a ConfigKeys,
    sounds: &'a SoundRegistry,
}

fn int<T: TryFrom<i64>>(table: &Table, key: &str) -> Option<T> {
    table.get(key)?.as_integer().and_then(|n| T::try_from(n).ok())
}

fn bool_at(table: &Table, key: &str) -> Option<bool> {
    table.get(key)?.as_bool()
}

fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        _ => Vec::new(),
    }
}

/// Descriptor form of `sound`: one string per step, a bare string for one step
pub fn sound_value(sound: &GuiSound) -> Option<Value> {
    let mut steps: Vec<Value> = sound
        .steps()
        .iter()
        .map(|step| Value::String(step.to_descriptor()))
        .collect();
    match steps.len() {
        0 => None,
        1 => steps.pop(),
        _ => Some(Value::Array(steps)),
    }
}

impl<'a> ItemCodec<'a> {
    pub fn new(keys: &'a ConfigKeys, sounds: &'a SoundRegistry) -> Self {
        Self { keys, sounds }
    }

    /// Sound from a descriptor, a registered id or a list of either
    pub fn read_sound(&self, value: &Value) -> Option<GuiSound> {
        let loaded = match value {
            Value::String(descriptor) => self.sounds.load_sound(descriptor),
            Value::Array(_) => self.sounds.load_sequence(&strings(value)),
            _ => return None,
        };
        loaded
            .map_err(|e| log::warn!("Ignoring sound {}: {}", value, e))
            .ok()
    }

    pub fn read(&self, table: &Table) -> GuiItem {
        let keys = self.keys;
        let text = |key: &str| table.get(key).and_then(Value::as_str).map(str::to_string);

        let mut item = GuiItem::new(
            text(&keys.material).unwrap_or_else(|| AIR.to_string()),
            text(&keys.name).unwrap_or_default(),
        );
        item.lore = table.get(&keys.lore).map(strings).unwrap_or_default();
        item.amount = int(table, &keys.amount).unwrap_or(1);
        item.glow = bool_at(table, &keys.glow).unwrap_or(false);
        item.flags = table
            .get(&keys.flags)
            .map(strings)
            .unwrap_or_default()
            .iter()
            .filter_map(|name| {
                let flag = ItemFlag::from_name(name);
                if flag.is_none() {
                    log::debug!("Unknown item flag '{}'", name);
                }
                flag
            })
            .collect();
        item.model = int(table, &keys.model);
        item.texture = text(&keys.texture);
        if let Some(enchantments) = table.get(&keys.enchantments).and_then(Value::as_table) {
            item.enchantments = enchantments
                .iter()
                .filter_map(|(name, level)| Some((name.clone(), u32::try_from(level.as_integer()?).ok()?)))
                .collect();
        }
        item.unbreakable = bool_at(table, &keys.unbreakable).unwrap_or(false);
        item.damage = int(table, &keys.damage);

        // slots may be written as numbers or numeric strings
        item.slot = int(table, &keys.slot).or_else(|| text(&keys.slot).and_then(|s| s.trim().parse().ok()));
        if let Some(Value::Array(slots)) = table.get(&keys.slots) {
            item.slots = slots
                .iter()
                .filter_map(|v| usize::try_from(v.as_integer()?).ok())
                .collect();
        }

        if let Some(placeholders) = table.get(&keys.placeholders).and_then(Value::as_table) {
            let style = placeholders
                .iter()
                .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_string())))
                .fold(StyleSheet::new(), |style, (k, v)| style.with_placeholder(k, v));
            item.style = Some(style);
        }
        item.small_caps_name = bool_at(table, &keys.font_name);
        item.small_caps_lore = bool_at(table, &keys.font_lore);
        item.click_sound = table.get(&keys.click_sound).and_then(|v| self.read_sound(v));
        item
    }

    pub fn write(&self, item: &GuiItem) -> Table {
        let keys = self.keys;
        let mut table = Table::new();
        let mut put = |key: &str, value: Value| {
            table.insert(key.to_string(), value);
        };

        put(&keys.material, item.material.clone().into());
        put(&keys.name, item.current_name().into());
        put(&keys.lore, item.current_lore().into());
        put(&keys.amount, i64::from(item.amount).into());
        put(&keys.glow, item.glow.into());
        put(&keys.flags, item.flags.iter().map(|f| f.name()).collect::<Vec<_>>().into());
        if let Some(model) = item.model {
            put(&keys.model, i64::from(model).into());
        }
        if let Some(texture) = &item.texture {
            put(&keys.texture, texture.clone().into());
        }
        if !item.enchantments.is_empty() {
            let enchantments: Table = item
                .enchantments
                .iter()
                .map(|(name, level)| (name.clone(), Value::Integer(i64::from(*level))))
                .collect();
            put(&keys.enchantments, Value::Table(enchantments));
        }
        put(&keys.unbreakable, item.unbreakable.into());
        if let Some(damage) = item.damage {
            put(&keys.damage, i64::from(damage).into());
        }
        if let Some(slot) = item.slot {
            put(&keys.slot, (slot as i64).into());
        }
        if !item.slots.is_empty() {
            let slots: Vec<i64> = item.slots.iter().map(|&s| s as i64).collect();
            put(&keys.slots, slots.into());
        }
        if let Some(style) = item.style.as_ref().filter(|s| !s.placeholders.is_empty()) {
            let placeholders: Table = style
                .placeholders
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            put(&keys.placeholders, Value::Table(placeholders));
        }
        if let Some(caps) = item.small_caps_name {
            put(&keys.font_name, caps.into());
        }
        if let Some(caps) = item.small_caps_lore {
            put(&keys.font_lore, caps.into());
        }
        if let Some(sound) = item.click_sound.as_ref().and_then(sound_value) {
            put(&keys.click_sound, sound);
        }
        table
    }
}
