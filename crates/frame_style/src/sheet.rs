//! Style sheets - the per-viewer context text is styled against

use frame_core::{GameVersion, ViewerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The player a GUI is rendered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Stable identity
    pub id: ViewerId,
    /// Display name, substituted for `{player}`
    pub name: String,
    /// Client protocol version, when a version bridge reports one
    #[serde(default)]
    pub client_version: Option<GameVersion>,
}

impl Viewer {
    /// Create a viewer without a known client version
    pub fn new(id: ViewerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            client_version: None,
        }
    }

    /// Set the client version
    pub fn with_client_version(mut self, version: GameVersion) -> Self {
        self.client_version = Some(version);
        self
    }
}

/// Which text fields are rendered in small caps by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylishFlags {
    /// Window titles
    pub title: bool,
    /// Item display names
    pub name: bool,
    /// Item lore lines
    pub lore: bool,
}

impl StylishFlags {
    /// Every field stylish
    pub const ALL: StylishFlags = StylishFlags {
        title: true,
        name: true,
        lore: true,
    };
}

/// Styling context: who is viewing and which custom placeholders apply.
///
/// A session deep-copies its sheet before rendering, so mutating the sheet a
/// blueprint was opened with never leaks into live inventories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// Viewer used for `{player}` and external placeholders
    #[serde(skip)]
    pub viewer: Option<Viewer>,
    /// Literal replacements, applied key by key
    pub placeholders: BTreeMap<String, String>,
    /// Small caps defaults
    pub stylish: StylishFlags,
}

impl StyleSheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet with the given small caps defaults
    pub fn with_stylish(mut self, stylish: StylishFlags) -> Self {
        self.stylish = stylish;
        self
    }

    /// Set the viewer
    pub fn with_viewer(mut self, viewer: Viewer) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Add a custom placeholder
    pub fn with_placeholder(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders.insert(key.into(), value.into());
        self
    }

    /// Name of the viewer, if any
    pub fn viewer_name(&self) -> Option<&str> {
        self.viewer.as_ref().map(|v| v.name.as_str())
    }

    /// Overlay item-level overrides on top of this context.
    ///
    /// Placeholders of `overrides` win on key clashes; its viewer replaces
    /// ours only when set. Stylish flags stay with the session.
    pub fn merged(&self, overrides: &StyleSheet) -> StyleSheet {
        let mut merged = self.clone();
        merged
            .placeholders
            .extend(overrides.placeholders.iter().map(|(k, v)| (k.clone(), v.clone())));
        if overrides.viewer.is_some() {
            merged.viewer = overrides.viewer.clone();
        }
        merged
    }

    /// True when nothing differs from `defaults` and no viewer or placeholder is set
    pub fn is_empty(&self, defaults: StylishFlags) -> bool {
        self.viewer.is_none() && self.placeholders.is_empty() && self.stylish == defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alex() -> Viewer {
        Viewer::new(ViewerId::random(), "Alex")
    }

    #[test]
    fn test_merge_item_placeholders_win() {
        let session = StyleSheet::new()
            .with_viewer(alex())
            .with_placeholder("{rank}", "member")
            .with_placeholder("{coins}", "10");
        let item = StyleSheet::new().with_placeholder("{coins}", "99");

        let merged = session.merged(&item);
        assert_eq!(merged.placeholders["{coins}"], "99");
        assert_eq!(merged.placeholders["{rank}"], "member");
        assert_eq!(merged.viewer_name(), Some("Alex"));
    }

    #[test]
    fn test_merge_keeps_session_untouched() {
        let session = StyleSheet::new().with_placeholder("{a}", "1");
        let _ = session.merged(&StyleSheet::new().with_placeholder("{a}", "2"));
        assert_eq!(session.placeholders["{a}"], "1");
    }

    #[test]
    fn test_is_empty() {
        assert!(StyleSheet::new().is_empty(StylishFlags::default()));
        assert!(!StyleSheet::new().is_empty(StylishFlags::ALL));
        assert!(!StyleSheet::new().with_viewer(alex()).is_empty(StylishFlags::default()));
    }
}
