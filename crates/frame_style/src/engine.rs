//! The style pipeline
//!
//! Text goes through four stages, in order:
//! 1. `{player}` and custom placeholder substitution
//! 2. the external placeholder resolver, when one is installed
//! 3. color code translation for the configured [`ColorMode`]
//! 4. small caps conversion

use crate::caps::{to_small_caps, FontMaps};
use crate::color::ColorMode;
use crate::sheet::{StyleSheet, Viewer};
use frame_core::GameVersion;
use std::sync::Arc;

/// Host-provided placeholder expansion (e.g. a placeholder plugin)
pub trait PlaceholderResolver: Send + Sync {
    /// Expand placeholders in `text` for `viewer`
    fn resolve(&self, viewer: Option<&Viewer>, text: &str) -> String;
}

/// Text styling service
pub trait StyleEngine: Send + Sync {
    /// Style one line of text. `small_caps` is the default for text outside
    /// explicit caps tags.
    fn apply_style(&self, text: &str, context: &StyleSheet, small_caps: bool) -> String;

    /// Style every line of `lines`
    fn apply_style_lines(&self, lines: &[String], context: &StyleSheet, small_caps: bool) -> Vec<String> {
        lines
            .iter()
            .map(|line| self.apply_style(line, context, small_caps))
            .collect()
    }
}

/// Default [`StyleEngine`]
#[derive(Clone)]
pub struct DefaultStyleEngine {
    color_mode: ColorMode,
    fonts: FontMaps,
    server_version: GameVersion,
    resolver: Option<Arc<dyn PlaceholderResolver>>,
}

impl DefaultStyleEngine {
    /// Create an engine with built-in fonts
    pub fn new(color_mode: ColorMode, server_version: GameVersion) -> Self {
        Self {
            color_mode,
            fonts: FontMaps::builtin(),
            server_version,
            resolver: None,
        }
    }

    /// Replace the font maps
    pub fn with_fonts(mut self, fonts: FontMaps) -> Self {
        self.fonts = fonts;
        self
    }

    /// Install an external placeholder resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn PlaceholderResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Configured color mode
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Configured server version
    pub fn server_version(&self) -> &GameVersion {
        &self.server_version
    }

    fn substitute(&self, text: &str, context: &StyleSheet) -> String {
        let mut out = match context.viewer_name() {
            Some(name) => text.replace("{player}", name),
            None => text.to_string(),
        };
        for (key, value) in &context.placeholders {
            if out.contains(key.as_str()) {
                out = out.replace(key.as_str(), value);
            }
        }
        out
    }
}

impl Default for DefaultStyleEngine {
    fn default() -> Self {
        Self::new(ColorMode::default(), GameVersion::parse("1.20"))
    }
}

impl core::fmt::Debug for DefaultStyleEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DefaultStyleEngine")
            .field("color_mode", &self.color_mode)
            .field("server_version", &self.server_version.to_string())
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl StyleEngine for DefaultStyleEngine {
    fn apply_style(&self, text: &str, context: &StyleSheet, small_caps: bool) -> String {
        let mut styled = self.substitute(text, context);

        if let Some(resolver) = &self.resolver {
            styled = resolver.resolve(context.viewer.as_ref(), &styled);
        }

        styled = self.color_mode.apply(&styled);

        let client = context
            .viewer
            .as_ref()
            .and_then(|v| v.client_version.as_ref())
            .unwrap_or(&self.server_version);
        to_small_caps(&styled, self.fonts.select(client), small_caps)
    }
}
