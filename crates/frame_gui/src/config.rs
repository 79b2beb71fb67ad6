//! Configuration objects
//!
//! [`FrameConfig`] holds the process-wide defaults a plugin loads once at
//! startup; [`FrameServices`] bundles it with the shared style engine, sound
//! registry and profile cache. Both are passed explicitly to whatever needs
//! them.

use frame_audio::{GuiSound, SoundRegistry};
use frame_core::{FrameError, GameVersion, Grid, Result};
use frame_style::{ColorMode, DefaultStyleEngine, StyleEngine, StyleSheet, StylishFlags};
use frame_texture::{ProfileCache, ProfileCapability};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sounds played on GUI events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSounds {
    /// Played on every click unless the item overrides it
    pub click: GuiSound,
    /// Played on the first open of a GUI per viewer
    pub open: GuiSound,
    /// Played once the viewer has left the GUI
    pub close: GuiSound,
}

impl EventSounds {
    /// Fill every silent sound from `defaults`
    pub fn or(mut self, defaults: &EventSounds) -> Self {
        if self.click.is_empty() {
            self.click = defaults.click.clone();
        }
        if self.open.is_empty() {
            self.open = defaults.open.clone();
        }
        if self.close.is_empty() {
            self.close = defaults.close.clone();
        }
        self
    }
}

/// Process-wide defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Color code dialect for styled text
    pub color_mode: ColorMode,
    /// Small caps defaults for new settings
    pub stylish: StylishFlags,
    /// Default event sounds
    pub sounds: EventSounds,
    /// Trace builder execution
    pub debugging: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Legacy,
            stylish: StylishFlags::default(),
            sounds: EventSounds::default(),
            debugging: false,
        }
    }
}

impl FrameConfig {
    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FrameError::Config(e.to_string()))
    }

    /// A GUI setting seeded with these defaults
    pub fn setting(&self, rows: usize, title: impl Into<String>) -> GuiSetting {
        let mut setting = GuiSetting::new(rows, title);
        setting.style.stylish = self.stylish;
        setting.sounds = self.sounds.clone();
        setting
    }
}

/// Layout and look of one GUI or page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiSetting {
    /// Chest rows, 1 to 6
    pub rows: usize,
    /// Window title; `{page}` is replaced with the page id
    pub title: String,
    /// Style context for titles and items
    pub style: StyleSheet,
    /// Event sounds; silent entries fall back to [`FrameConfig::sounds`]
    pub sounds: EventSounds,
    /// Free-form tag for the plugin's own bookkeeping
    pub label: String,
}

impl GuiSetting {
    /// Create a setting without sounds or small caps
    pub fn new(rows: usize, title: impl Into<String>) -> Self {
        Self {
            rows,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the style sheet
    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    /// Set the event sounds
    pub fn with_sounds(mut self, sounds: EventSounds) -> Self {
        self.sounds = sounds;
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validated grid for these rows
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.rows)
    }
}

/// Shared services handed to every session
#[derive(Clone)]
pub struct FrameServices {
    /// Loaded defaults
    pub config: FrameConfig,
    /// Text styling
    pub style: Arc<dyn StyleEngine>,
    /// Named sounds
    pub sounds: SoundRegistry,
    /// Skull profiles
    pub profiles: Arc<ProfileCache>,
}

impl FrameServices {
    /// Create services for a server of the given version
    pub fn new(config: FrameConfig, server_version: GameVersion) -> Self {
        let capability = ProfileCapability::detect(&server_version);
        log::debug!("Server {} uses {:?} skull profiles", server_version, capability);
        Self {
            style: Arc::new(DefaultStyleEngine::new(config.color_mode, server_version)),
            config,
            sounds: SoundRegistry::new(),
            profiles: Arc::new(ProfileCache::new(capability)),
        }
    }

    /// Replace the style engine
    pub fn with_style_engine(mut self, engine: Arc<dyn StyleEngine>) -> Self {
        self.style = engine;
        self
    }

    /// Replace the sound registry
    pub fn with_sounds(mut self, sounds: SoundRegistry) -> Self {
        self.sounds = sounds;
        self
    }

    /// Replace the profile cache
    pub fn with_profiles(mut self, profiles: Arc<ProfileCache>) -> Self {
        self.profiles = profiles;
        self
    }
}

impl Default for FrameServices {
    fn default() -> Self {
        Self::new(FrameConfig::default(), GameVersion::parse("1.20.4"))
    }
}

impl core::fmt::Debug for FrameServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameServices")
            .field("config", &self.config)
            .field("sounds", &self.sounds.len())
            .field("profiles", &self.profiles.len())
            .finish()
    }
}
