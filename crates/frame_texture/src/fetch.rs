//! Looking up a player's skin texture on the session server

use crate::cache::TextureCache;
use crate::error::{Result, TextureError};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Session server profile endpoint
pub const SESSION_SERVER_URL: &str = "https://sessionserver.mojang.com/session/minecraft/profile/";

/// Source of base64 texture values by player id
pub trait TextureFetcher: Send + Sync {
    /// Look up the texture of `id`; `None` when unavailable
    fn fetch(&self, id: Uuid) -> Option<String>;
}

/// Blocking HTTP GET supplied by the host
pub trait HttpClient: Send + Sync {
    /// Fetch `url` and return the response body
    fn get(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct SessionProfile {
    #[serde(default)]
    properties: Vec<SessionProperty>,
}

#[derive(Debug, Deserialize)]
struct SessionProperty {
    value: String,
}

/// Profile URL for `id`
pub fn session_profile_url(id: Uuid) -> String {
    format!("{SESSION_SERVER_URL}{id}?unsigned=false")
}

/// Extract the first property value from a session server response
pub fn parse_session_profile(body: &str) -> Result<String> {
    let profile: SessionProfile = serde_json::from_str(body)?;
    profile
        .properties
        .into_iter()
        .next()
        .map(|p| p.value)
        .ok_or(TextureError::MissingTextures)
}

/// [`TextureFetcher`] querying the session server through an [`HttpClient`]
pub struct SessionServerFetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> SessionServerFetcher<C> {
    /// Create a fetcher
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: HttpClient> TextureFetcher for SessionServerFetcher<C> {
    fn fetch(&self, id: Uuid) -> Option<String> {
        let url = session_profile_url(id);
        match self.client.get(&url).and_then(|body| parse_session_profile(&body)) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("Failed to fetch texture for {}: {}", id, e);
                None
            }
        }
    }
}

/// Cache in front of a fetcher
pub struct CachedTextures {
    cache: TextureCache,
    fetcher: Arc<dyn TextureFetcher>,
}

impl CachedTextures {
    /// Create with an empty cache
    pub fn new(fetcher: Arc<dyn TextureFetcher>) -> Self {
        Self {
            cache: TextureCache::new(),
            fetcher,
        }
    }

    /// Texture of `id`, fetched on first use. Misses are not cached.
    pub fn texture_for(&self, id: Uuid) -> Option<String> {
        if let Some(texture) = self.cache.get(id) {
            return Some(texture);
        }
        let texture = self.fetcher.fetch(id)?;
        self.cache.add(id, texture.clone());
        Some(texture)
    }

    /// The underlying cache
    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }
}
