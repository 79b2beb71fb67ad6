//! Document key names
//!
//! Every key the codecs read or write is configurable, so plugins can keep
//! their existing file layouts. Keys load from the `[keys]` table of a
//! plugin config:
//!
//! ```toml
//! [keys]
//! material = "type"
//! default-rows = 3
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Key names and fallbacks used by the item and inventory codecs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigKeys {
    // Inventory sections
    pub inventory_title: String,
    pub inventory_rows: String,
    pub inventory_items: String,
    pub default_title: String,
    pub default_rows: usize,

    // Items
    pub material: String,
    pub name: String,
    pub lore: String,
    pub amount: String,
    pub glow: String,
    pub flags: String,
    pub model: String,
    pub texture: String,
    pub enchantments: String,
    pub unbreakable: String,
    pub damage: String,
    pub slot: String,
    pub slots: String,
    pub placeholders: String,

    // Styling
    pub font_title: String,
    pub font_name: String,
    pub font_lore: String,
    pub click_sound: String,
    pub open_sound: String,
    pub close_sound: String,
}

impl Default for ConfigKeys {
    fn default() -> Self {
        Self {
            inventory_title: "title".into(),
            inventory_rows: "rows".into(),
            inventory_items: "items".into(),
            default_title: "Slotframe Inventory".into(),
            default_rows: 6,
            material: "material".into(),
            name: "name".into(),
            lore: "lore".into(),
            amount: "amount".into(),
            glow: "glow".into(),
            flags: "flags".into(),
            model: "model".into(),
            texture: "texture".into(),
            enchantments: "enchantments".into(),
            unbreakable: "unbreakable".into(),
            damage: "damage".into(),
            slot: "slot".into(),
            slots: "slots".into(),
            placeholders: "placeholders".into(),
            font_title: "font-title".into(),
            font_name: "font-name".into(),
            font_lore: "font-lore".into(),
            click_sound: "click-sound".into(),
            open_sound: "open-sound".into(),
            close_sound: "close-sound".into(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct KeysDocument {
    keys: ConfigKeys,
}

impl ConfigKeys {
    /// Read the `[keys]` table of `text`; anything missing keeps its default
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let document: KeysDocument = toml::from_str(text)?;
        Ok(document.keys)
    }
}
