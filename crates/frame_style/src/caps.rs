//! Small caps conversion with version-keyed font maps
//!
//! Older clients lack glyphs for parts of the small caps alphabet, so each
//! map is keyed by the oldest game version that renders it. The best map a
//! viewer supports is picked per conversion.
//!
//! Inline tags override the default for a stretch of text:
//! - `<caps>` ... `</caps>` forces conversion on
//! - `<no-caps>` ... `</no-caps>` forces conversion off
//!
//! Color codes (`&x`, `§x`) are never converted.

use crate::error::{Result, StyleError};
use frame_core::GameVersion;
use std::collections::BTreeMap;

/// Character to glyph mapping for one version
pub type FontMap = BTreeMap<char, String>;

const MODERN_GLYPHS: &[(char, &str)] = &[
    ('0', "𝟬"),
    ('1', "𝟭"),
    ('2', "𝟮"),
    ('3', "𝟯"),
    ('4', "𝟰"),
    ('5', "𝟱"),
    ('6', "𝟲"),
    ('7', "𝟳"),
    ('8', "𝟴"),
    ('9', "𝟵"),
    ('@', "＠"),
];

const ALPHABET: &[(char, &str)] = &[
    ('a', "ᴀ"),
    ('b', "ʙ"),
    ('c', "ᴄ"),
    ('d', "ᴅ"),
    ('e', "ᴇ"),
    ('f', "ꜰ"),
    ('g', "ɢ"),
    ('h', "ʜ"),
    ('i', "ɪ"),
    ('j', "ᴊ"),
    ('k', "ᴋ"),
    ('l', "ʟ"),
    ('m', "ᴍ"),
    ('n', "ɴ"),
    ('o', "ᴏ"),
    ('p', "ᴘ"),
    ('q', "ǫ"),
    ('r', "ʀ"),
    ('s', "s"),
    ('t', "ᴛ"),
    ('u', "ᴜ"),
    ('v', "ᴠ"),
    ('w', "ᴡ"),
    ('x', "x"),
    ('y', "ʏ"),
    ('z', "ᴢ"),
];

/// Which conversion applies at the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapsState {
    Default,
    ForceOn,
    ForceOff,
}

/// Font maps keyed by minimum game version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMaps {
    maps: BTreeMap<String, FontMap>,
}

impl FontMaps {
    /// Create an empty set; no text is ever converted
    pub fn empty() -> Self {
        Self {
            maps: BTreeMap::new(),
        }
    }

    /// Built-in maps for 1.16 (letters) and 1.20 (letters, digits, `@`)
    pub fn builtin() -> Self {
        let legacy: FontMap = ALPHABET.iter().map(|(c, g)| (*c, g.to_string())).collect();
        let mut modern = legacy.clone();
        modern.extend(MODERN_GLYPHS.iter().map(|(c, g)| (*c, g.to_string())));

        let mut maps = BTreeMap::new();
        maps.insert("1.16".to_string(), legacy);
        maps.insert("1.20".to_string(), modern);
        Self { maps }
    }

    /// Parse font maps from a TOML document.
    ///
    /// Top-level tables are versions. A key containing a dot is used as is,
    /// a bare number `n` means `1.n`. Entries whose key is not exactly one
    /// character are skipped.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = toml::from_str(text)?;
        if raw.is_empty() {
            return Err(StyleError::EmptyFontDocument);
        }

        let mut maps = BTreeMap::new();
        for (key, entries) in raw {
            let version = if key.contains('.') {
                key
            } else {
                format!("1.{key}")
            };
            let map: FontMap = entries
                .into_iter()
                .filter_map(|(k, glyph)| {
                    let mut chars = k.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some((c, glyph)),
                        _ => None,
                    }
                })
                .collect();
            maps.insert(version, map);
        }
        Ok(Self { maps })
    }

    /// Parse font maps, falling back to the built-in set on any error
    pub fn load_or_builtin(text: &str) -> Self {
        match Self::from_toml_str(text) {
            Ok(maps) => maps,
            Err(e) => {
                log::warn!("Using built-in small caps fonts: {}", e);
                Self::builtin()
            }
        }
    }

    /// Insert or replace a map
    pub fn insert(&mut self, version: impl Into<String>, map: FontMap) {
        self.maps.insert(version.into(), map);
    }

    /// Version keys currently loaded
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    /// Check if no maps are loaded
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Pick the newest map whose version `client` supports
    pub fn select(&self, client: &GameVersion) -> Option<&FontMap> {
        let mut candidates: Vec<(GameVersion, &FontMap)> = self
            .maps
            .iter()
            .map(|(key, map)| (GameVersion::parse(key), map))
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0));
        candidates
            .into_iter()
            .find(|(version, _)| client >= version)
            .map(|(_, map)| map)
    }
}

impl Default for FontMaps {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Convert `text` to small caps using `map`.
///
/// `default_on` decides the state outside of explicit tags. The scoping tags
/// are always stripped, even when `map` is `None`; other `<...>` tags are
/// copied through untouched.
pub fn to_small_caps(text: &str, map: Option<&FontMap>, default_on: bool) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut state = CapsState::Default;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(close) = rest.find('>') {
                let tag = &rest[1..close];
                match tag.to_ascii_lowercase().as_str() {
                    "caps" => state = CapsState::ForceOn,
                    "no-caps" => state = CapsState::ForceOff,
                    "/caps" | "/no-caps" => state = CapsState::Default,
                    _ => out.push_str(&rest[..=close]),
                }
                rest = &rest[close + 1..];
                continue;
            }
        }

        let convert = match state {
            CapsState::ForceOn => true,
            CapsState::ForceOff => false,
            CapsState::Default => default_on,
        };

        let mut advance = c.len_utf8();
        match map {
            Some(map) if convert => {
                if c == '&' || c == crate::color::SECTION {
                    out.push(c);
                    if let Some(code) = rest[advance..].chars().next() {
                        out.push(code);
                        advance += code.len_utf8();
                    }
                } else {
                    let lower = c.to_lowercase().next().unwrap_or(c);
                    match map.get(&lower) {
                        Some(glyph) => out.push_str(glyph),
                        None => out.push(c),
                    }
                }
            }
            _ => out.push(c),
        }
        rest = &rest[advance..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_best_version() {
        let fonts = FontMaps::builtin();
        let modern = fonts.select(&"1.20.4".into()).unwrap();
        assert!(modern.contains_key(&'1'));
        let legacy = fonts.select(&"1.18".into()).unwrap();
        assert!(!legacy.contains_key(&'1'));
        assert!(fonts.select(&"1.12".into()).is_none());
    }

    #[test]
    fn test_default_on_converts() {
        let fonts = FontMaps::builtin();
        let map = fonts.select(&"1.20".into());
        assert_eq!(to_small_caps("Shop", map, true), "sʜᴏᴘ");
        assert_eq!(to_small_caps("Shop", map, false), "Shop");
    }

    #[test]
    fn test_tags_scope_conversion() {
        let fonts = FontMaps::builtin();
        let map = fonts.select(&"1.20".into());
        assert_eq!(to_small_caps("a<caps>b</caps>c", map, false), "aʙc");
        assert_eq!(to_small_caps("a<no-caps>b</no-caps>c", map, true), "ᴀbᴄ");
        assert_eq!(to_small_caps("<green>a", map, true), "<green>ᴀ");
    }

    #[test]
    fn test_color_codes_untouched() {
        let fonts = FontMaps::builtin();
        let map = fonts.select(&"1.20".into());
        assert_eq!(to_small_caps("§aab", map, true), "§aᴀʙ");
        assert_eq!(to_small_caps("&lb", map, true), "&lʙ");
    }

    #[test]
    fn test_tags_stripped_without_map() {
        assert_eq!(to_small_caps("<caps>ab</caps>", None, false), "ab");
    }

    #[test]
    fn test_load_from_toml() {
        let fonts = FontMaps::from_toml_str(
            r#"
            [19]
            a = "A"

            ["1.21.1"]
            a = "X"
            bad = "ignored"
            "#,
        )
        .unwrap();
        let versions: Vec<&str> = fonts.versions().collect();
        assert_eq!(versions, vec!["1.19", "1.21.1"]);
        assert_eq!(fonts.select(&"1.20".into()).unwrap()[&'a'], "A");
        assert_eq!(fonts.select(&"1.21.1".into()).unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_falls_back() {
        assert_eq!(FontMaps::load_or_builtin("not = [valid"), FontMaps::builtin());
        assert_eq!(FontMaps::load_or_builtin(""), FontMaps::builtin());
    }
}
