//! The plugin host seam
//!
//! Everything the engine needs from the server runtime goes through
//! [`Host`]: showing inventories, chat messages and sound playback.
//! [`RecordingHost`] is an in-memory implementation for tests, available
//! outside this crate with the `test-util` feature.

use crate::render::Inventory;
use frame_audio::SoundSink;
#[cfg(any(test, feature = "test-util"))]
use frame_audio::SoundCue;
use frame_core::{HandlerId, InventoryKey, ViewerId};
#[cfg(any(test, feature = "test-util"))]
use std::collections::HashMap;

/// Server runtime operations used by GUIs
pub trait Host: SoundSink {
    /// Show `inventory` to `viewer`, replacing whatever they have open
    fn open_inventory(&mut self, viewer: ViewerId, inventory: &Inventory);

    /// Close the viewer's open inventory
    fn close_inventory(&mut self, viewer: ViewerId);

    /// Key of the inventory the viewer currently has open
    fn top_inventory(&self, viewer: ViewerId) -> Option<InventoryKey>;

    /// Send a chat message
    fn send_message(&mut self, viewer: ViewerId, message: &str);

    /// Push updated contents of an inventory the viewer already has open
    fn refresh_inventory(&mut self, _viewer: ViewerId, _inventory: &Inventory) {}
}

/// Identity carried by a host inventory: its key and the GUI that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventoryRef {
    pub key: InventoryKey,
    /// `None` for inventories no GUI owns, e.g. the player's own
    pub owner: Option<HandlerId>,
}

impl InventoryRef {
    pub fn of(inventory: &Inventory) -> Self {
        Self {
            key: inventory.key,
            owner: Some(inventory.owner),
        }
    }

    /// An inventory not owned by any GUI
    pub fn foreign(key: InventoryKey) -> Self {
        Self { key, owner: None }
    }
}

/// Sound played through a [`RecordingHost`]
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedSound {
    pub viewer: ViewerId,
    pub name: String,
    pub delay: u64,
}

/// [`Host`] that records every call
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub opened: Vec<(ViewerId, Inventory)>,
    pub refreshed: Vec<(ViewerId, Inventory)>,
    pub closed: Vec<ViewerId>,
    pub messages: Vec<(ViewerId, String)>,
    pub sounds: Vec<PlayedSound>,
    top: HashMap<ViewerId, InventoryKey>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory most recently opened for `viewer`
    pub fn last_opened(&self, viewer: ViewerId) -> Option<&Inventory> {
        self.opened
            .iter()
            .rev()
            .find(|(v, _)| *v == viewer)
            .map(|(_, inv)| inv)
    }

    /// Messages sent to `viewer`, oldest first
    pub fn messages_for(&self, viewer: ViewerId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(v, _)| *v == viewer)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// Names of sounds played for `viewer`
    pub fn sounds_for(&self, viewer: ViewerId) -> Vec<&str> {
        self.sounds
            .iter()
            .filter(|s| s.viewer == viewer)
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Pretend the viewer switched to an inventory outside any GUI
    pub fn set_top_inventory(&mut self, viewer: ViewerId, key: Option<InventoryKey>) {
        match key {
            Some(key) => self.top.insert(viewer, key),
            None => self.top.remove(&viewer),
        };
    }
}

#[cfg(any(test, feature = "test-util"))]
impl SoundSink for RecordingHost {
    fn play_sound(&mut self, viewer: ViewerId, cue: &SoundCue, delay_ticks: u64) {
        self.sounds.push(PlayedSound {
            viewer,
            name: cue.name.clone(),
            delay: delay_ticks,
        });
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Host for RecordingHost {
    fn open_inventory(&mut self, viewer: ViewerId, inventory: &Inventory) {
        self.top.insert(viewer, inventory.key);
        self.opened.push((viewer, inventory.clone()));
    }

    fn close_inventory(&mut self, viewer: ViewerId) {
        self.top.remove(&viewer);
        self.closed.push(viewer);
    }

    fn top_inventory(&self, viewer: ViewerId) -> Option<InventoryKey> {
        self.top.get(&viewer).copied()
    }

    fn send_message(&mut self, viewer: ViewerId, message: &str) {
        self.messages.push((viewer, message.to_string()));
    }

    fn refresh_inventory(&mut self, viewer: ViewerId, inventory: &Inventory) {
        self.refreshed.push((viewer, inventory.clone()));
    }
}
