//! Item blueprints
//!
//! A [`GuiItem`] describes what a slot should show. It is cloned on every
//! placement and only turned into a [`DisplayItem`](crate::render::DisplayItem)
//! when a session renders it for a viewer.

use crate::event::ClickHandler;
use frame_audio::GuiSound;
use frame_core::SlotIndex;
use frame_style::StyleSheet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Material of the empty slot
pub const AIR: &str = "AIR";

/// Producer of a display name evaluated at render time
pub type TextProducer = Arc<dyn Fn() -> String + Send + Sync>;

/// Producer of lore lines evaluated at render time
pub type LoreProducer = Arc<dyn Fn() -> Vec<String> + Send + Sync>;

/// Tooltip sections an item can hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemFlag {
    HideEnchants,
    HideAttributes,
    HideUnbreakable,
    HideDestroys,
    HidePlacedOn,
    HideAdditionalTooltip,
    HideDye,
    HideArmorTrim,
}

impl ItemFlag {
    /// Parse a host flag name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let flag = match name.trim().to_ascii_uppercase().as_str() {
            "HIDE_ENCHANTS" => ItemFlag::HideEnchants,
            "HIDE_ATTRIBUTES" => ItemFlag::HideAttributes,
            "HIDE_UNBREAKABLE" => ItemFlag::HideUnbreakable,
            "HIDE_DESTROYS" => ItemFlag::HideDestroys,
            "HIDE_PLACED_ON" => ItemFlag::HidePlacedOn,
            "HIDE_ADDITIONAL_TOOLTIP" | "HIDE_POTION_EFFECTS" => ItemFlag::HideAdditionalTooltip,
            "HIDE_DYE" => ItemFlag::HideDye,
            "HIDE_ARMOR_TRIM" => ItemFlag::HideArmorTrim,
            _ => return None,
        };
        Some(flag)
    }

    /// Host flag name
    pub fn name(&self) -> &'static str {
        match self {
            ItemFlag::HideEnchants => "HIDE_ENCHANTS",
            ItemFlag::HideAttributes => "HIDE_ATTRIBUTES",
            ItemFlag::HideUnbreakable => "HIDE_UNBREAKABLE",
            ItemFlag::HideDestroys => "HIDE_DESTROYS",
            ItemFlag::HidePlacedOn => "HIDE_PLACED_ON",
            ItemFlag::HideAdditionalTooltip => "HIDE_ADDITIONAL_TOOLTIP",
            ItemFlag::HideDye => "HIDE_DYE",
            ItemFlag::HideArmorTrim => "HIDE_ARMOR_TRIM",
        }
    }
}

/// Item blueprint
#[derive(Clone)]
pub struct GuiItem {
    // Appearance
    pub material: String,
    pub name: String,
    pub name_state: Option<TextProducer>,
    pub lore: Vec<String>,
    pub lore_state: Option<LoreProducer>,
    pub amount: u32,
    pub glow: bool,
    pub flags: Vec<ItemFlag>,
    pub model: Option<i32>,
    /// Skull texture string, see [`frame_texture::TextureRef`]
    pub texture: Option<String>,

    // Functional meta
    pub enchantments: BTreeMap<String, u32>,
    pub unbreakable: bool,
    pub damage: Option<i32>,

    // Placement hints
    pub slot: Option<SlotIndex>,
    pub slots: Vec<SlotIndex>,

    // Style overrides
    /// Item placeholders; applied on top of the session context
    pub style: Option<StyleSheet>,
    pub small_caps_name: Option<bool>,
    pub small_caps_lore: Option<bool>,
    pub click_sound: Option<GuiSound>,

    pub on_click: Option<ClickHandler>,
}

impl Default for GuiItem {
    fn default() -> Self {
        Self {
            material: AIR.to_string(),
            name: String::new(),
            name_state: None,
            lore: Vec::new(),
            lore_state: None,
            amount: 1,
            glow: false,
            flags: Vec::new(),
            model: None,
            texture: None,
            enchantments: BTreeMap::new(),
            unbreakable: false,
            damage: None,
            slot: None,
            slots: Vec::new(),
            style: None,
            small_caps_name: None,
            small_caps_lore: None,
            click_sound: None,
            on_click: None,
        }
    }
}

impl GuiItem {
    /// Create an item of `material` named `name`
    pub fn new(material: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// The empty slot placeholder
    pub fn air() -> Self {
        Self::default()
    }

    /// True for air without any text
    pub fn is_empty(&self) -> bool {
        let air = self.material.is_empty() || self.material.eq_ignore_ascii_case(AIR);
        air && self.name.is_empty()
            && self.name_state.is_none()
            && self.lore.is_empty()
            && self.lore_state.is_none()
    }

    /// Display name, from the producer when one is set
    pub fn current_name(&self) -> String {
        match &self.name_state {
            Some(produce) => produce(),
            None => self.name.clone(),
        }
    }

    /// Lore lines, from the producer when one is set
    pub fn current_lore(&self) -> Vec<String> {
        match &self.lore_state {
            Some(produce) => produce(),
            None => self.lore.clone(),
        }
    }

    /// True when the item is a player head carrying a texture
    pub fn is_textured_skull(&self) -> bool {
        self.material.to_ascii_uppercase().contains("PLAYER_HEAD")
            && self.texture.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn with_lore<I, S>(mut self, lore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lore.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name_state(mut self, produce: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.name_state = Some(Arc::new(produce));
        self
    }

    pub fn with_lore_state(mut self, produce: impl Fn() -> Vec<String> + Send + Sync + 'static) -> Self {
        self.lore_state = Some(Arc::new(produce));
        self
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_glow(mut self, glow: bool) -> Self {
        self.glow = glow;
        self
    }

    pub fn with_flag(mut self, flag: ItemFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn with_model(mut self, model: i32) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_enchantment(mut self, enchantment: impl Into<String>, level: u32) -> Self {
        self.enchantments.insert(enchantment.into(), level);
        self
    }

    pub fn with_unbreakable(mut self, unbreakable: bool) -> Self {
        self.unbreakable = unbreakable;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    /// Preferred slot for [`set_item`](crate::builder::ChestGuiBuilder::set_item)
    pub fn with_slot(mut self, slot: SlotIndex) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_slots(mut self, slots: impl Into<Vec<SlotIndex>>) -> Self {
        self.slots = slots.into();
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = Some(style);
        self
    }

    /// Add one item placeholder, creating the item style when unset
    pub fn with_placeholder(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let style = self.style.take().unwrap_or_default();
        self.style = Some(style.with_placeholder(key, value));
        self
    }

    pub fn with_small_caps(mut self, name: Option<bool>, lore: Option<bool>) -> Self {
        self.small_caps_name = name;
        self.small_caps_lore = lore;
        self
    }

    pub fn with_click_sound(mut self, sound: GuiSound) -> Self {
        self.click_sound = Some(sound);
        self
    }

    pub fn with_on_click(mut self, handler: impl Fn(&mut crate::event::ClickEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    /// Content equality, ignoring producers, callbacks and placement
    pub fn same_look(&self, other: &GuiItem) -> bool {
        self.material == other.material
            && self.name == other.name
            && self.lore == other.lore
            && self.amount == other.amount
            && self.glow == other.glow
            && self.flags == other.flags
            && self.model == other.model
            && self.texture == other.texture
            && self.enchantments == other.enchantments
            && self.unbreakable == other.unbreakable
            && self.damage == other.damage
            && self.small_caps_name == other.small_caps_name
            && self.small_caps_lore == other.small_caps_lore
            && self.click_sound == other.click_sound
            && self.style.as_ref().map(|s| &s.placeholders) == other.style.as_ref().map(|s| &s.placeholders)
    }
}

impl core::fmt::Debug for GuiItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuiItem")
            .field("material", &self.material)
            .field("name", &self.name)
            .field("lore", &self.lore.len())
            .field("amount", &self.amount)
            .field("slot", &self.slot)
            .field("dynamic_name", &self.name_state.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}
