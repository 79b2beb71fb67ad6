//! Texture strings and skin URLs
//!
//! An item's texture string takes one of these forms:
//! - `{player}` - the viewer's own skin
//! - `[069a79f4-44e9-4726-a5be-fca90e38aaf5]` - the skin of that player
//! - `http...` - a skin URL
//! - base64 of `{"textures":{"SKIN":{"url":"..."}}}`
//! - a raw texture hash on the texture server

use crate::cache::ProfileCache;
use crate::profile::Profile;
use base64::Engine;
use frame_core::ViewerId;
use std::sync::Arc;
use uuid::Uuid;

/// Base URL of the skin texture server
pub const TEXTURE_BASE_URL: &str = "https://textures.minecraft.net/texture/";

/// Parsed texture string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureRef {
    /// The viewer's skin
    Viewer,
    /// Skin of the player with this id
    Player(Uuid),
    /// URL, base64 blob or texture hash
    Value(String),
}

impl TextureRef {
    /// Parse a texture string. Blank strings and malformed `[uuid]` forms
    /// yield `None`.
    pub fn parse(texture: &str) -> Option<Self> {
        let texture = texture.trim();
        if texture.is_empty() {
            return None;
        }
        if texture.eq_ignore_ascii_case("{player}") {
            return Some(TextureRef::Viewer);
        }
        if let Some(inner) = texture.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return match Uuid::parse_str(inner) {
                Ok(id) => Some(TextureRef::Player(id)),
                Err(e) => {
                    log::debug!("Ignoring malformed skull owner '{}': {}", inner, e);
                    None
                }
            };
        }
        Some(TextureRef::Value(texture.to_string()))
    }
}

/// What a skull should display once its texture string is resolved
#[derive(Debug, Clone, PartialEq)]
pub enum SkullOwner {
    /// The viewer the GUI was rendered for
    Viewer(ViewerId),
    /// Another player, looked up by the host
    Player(Uuid),
    /// A profile carrying the skin texture
    Profile(Arc<Profile>),
}

/// Resolve a texture string for one viewer.
///
/// `{player}` without a viewer resolves to nothing, so the host shows a
/// default skull.
pub fn resolve_skull(texture: &str, viewer: Option<ViewerId>, profiles: &ProfileCache) -> Option<SkullOwner> {
    match TextureRef::parse(texture)? {
        TextureRef::Viewer => viewer.map(SkullOwner::Viewer),
        TextureRef::Player(id) => Some(SkullOwner::Player(id)),
        TextureRef::Value(value) => Some(SkullOwner::Profile(profiles.get_profile(&value))),
    }
}

/// Decode a base64 textures blob into its skin URL
pub fn decode_skin_url(blob: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(blob.trim()).ok()?;
    if bytes.is_empty() {
        return None;
    }
    let text = String::from_utf8(bytes).ok()?;
    if !text.trim_start().starts_with('{') {
        return None;
    }
    let json: serde_json::Value = serde_json::from_str(&text).ok()?;
    json.get("textures")?
        .get("SKIN")?
        .get("url")?
        .as_str()
        .map(str::to_string)
}

/// Encode a skin URL as a base64 textures blob
pub fn encode_textures_property(skin_url: &str) -> String {
    let json = serde_json::json!({ "textures": { "SKIN": { "url": skin_url } } });
    base64::engine::general_purpose::STANDARD.encode(json.to_string())
}

/// Turn any URL, base64 or hash texture value into a skin URL
pub fn skin_url(texture: &str) -> String {
    if texture.starts_with("http") {
        return texture.to_string();
    }
    decode_skin_url(texture).unwrap_or_else(|| format!("{TEXTURE_BASE_URL}{texture}"))
}

/// Strip the texture server prefix from a skin URL
pub fn texture_id(skin_url: &str) -> &str {
    skin_url.strip_prefix(TEXTURE_BASE_URL).unwrap_or(skin_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileCapability;

    const HASH: &str = "4b7c0d0f1b3ad6c1a2e3f4b5c6d7e8f9";

    #[test]
    fn test_parse_forms() {
        assert_eq!(TextureRef::parse("{PLAYER}"), Some(TextureRef::Viewer));
        let id = Uuid::new_v4();
        assert_eq!(TextureRef::parse(&format!("[{id}]")), Some(TextureRef::Player(id)));
        assert_eq!(TextureRef::parse("[not-a-uuid]"), None);
        assert_eq!(TextureRef::parse(""), None);
        assert_eq!(TextureRef::parse(HASH), Some(TextureRef::Value(HASH.into())));
    }

    #[test]
    fn test_skin_url_variants() {
        assert_eq!(skin_url("https://example.com/skin.png"), "https://example.com/skin.png");
        assert_eq!(skin_url(HASH), format!("{TEXTURE_BASE_URL}{HASH}"));

        let blob = encode_textures_property("https://textures.minecraft.net/texture/abc");
        assert_eq!(skin_url(&blob), "https://textures.minecraft.net/texture/abc");
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let blob = base64::engine::general_purpose::STANDARD.encode("plain text");
        assert_eq!(decode_skin_url(&blob), None);
        assert_eq!(decode_skin_url("%%%"), None);
    }

    #[test]
    fn test_texture_id() {
        assert_eq!(texture_id(&format!("{TEXTURE_BASE_URL}{HASH}")), HASH);
        assert_eq!(texture_id("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_resolve_skull() {
        let cache = ProfileCache::new(ProfileCapability::PlayerProfiles);
        let viewer = ViewerId::random();
        assert_eq!(
            resolve_skull("{player}", Some(viewer), &cache),
            Some(SkullOwner::Viewer(viewer))
        );
        assert_eq!(resolve_skull("{player}", None, &cache), None);
        match resolve_skull(HASH, None, &cache) {
            Some(SkullOwner::Profile(profile)) => {
                assert_eq!(profile.skin_url().as_deref(), Some(skin_url(HASH).as_str()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
