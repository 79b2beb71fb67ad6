//! Profile and texture caches
//!
//! Both caches are shared across sessions and guarded by `parking_lot`
//! read-write locks.

use crate::profile::{Profile, ProfileCapability};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Profiles keyed by texture string
#[derive(Debug)]
pub struct ProfileCache {
    capability: ProfileCapability,
    profiles: RwLock<HashMap<String, Arc<Profile>>>,
}

impl ProfileCache {
    /// Create a cache building profiles of the given shape
    pub fn new(capability: ProfileCapability) -> Self {
        Self {
            capability,
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Profile shape this cache builds
    pub fn capability(&self) -> ProfileCapability {
        self.capability
    }

    /// Get the profile for `texture`, building it on first use
    pub fn get_profile(&self, texture: &str) -> Arc<Profile> {
        if let Some(profile) = self.profiles.read().get(texture) {
            return profile.clone();
        }
        self.profiles
            .write()
            .entry(texture.to_string())
            .or_insert_with(|| Arc::new(Profile::from_texture(texture, self.capability)))
            .clone()
    }

    /// Number of cached profiles
    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }

    /// Drop every cached profile
    pub fn clear(&self) {
        self.profiles.write().clear();
    }
}

/// Base64 texture values keyed by player id
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: RwLock<HashMap<Uuid, String>>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached texture for `id`
    pub fn get(&self, id: Uuid) -> Option<String> {
        self.textures.read().get(&id).cloned()
    }

    /// Store a texture for `id`
    pub fn add(&self, id: Uuid, texture: impl Into<String>) {
        self.textures.write().insert(id, texture.into());
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.textures.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.textures.read().is_empty()
    }
}
