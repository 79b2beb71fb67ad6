//! Skull profiles
//!
//! Servers from 1.18.1 on expose player profiles with a typed skin URL;
//! older ones only accept a raw game profile carrying a base64 `textures`
//! property. Which shape is built is decided once at startup.

use crate::texture::{encode_textures_property, skin_url};
use frame_core::GameVersion;
use uuid::Uuid;

/// Which profile shape the host supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileCapability {
    /// Typed player profiles
    PlayerProfiles,
    /// Raw game profiles with a textures property
    GameProfiles,
}

impl ProfileCapability {
    /// First version with typed player profiles
    pub fn player_profiles_since() -> GameVersion {
        GameVersion::new(vec![1u32, 18, 1])
    }

    /// Detect from the server version
    pub fn detect(server: &GameVersion) -> Self {
        if *server >= Self::player_profiles_since() {
            ProfileCapability::PlayerProfiles
        } else {
            ProfileCapability::GameProfiles
        }
    }
}

/// Profile for hosts with typed player profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModernProfile {
    /// Random profile id
    pub id: Uuid,
    /// Skin URL, absent when the texture could not be turned into one
    pub skin_url: Option<String>,
}

/// Profile for hosts that take a raw textures property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyProfile {
    /// Random profile id
    pub id: Uuid,
    /// Base64 `textures` property value
    pub textures: Option<String>,
}

/// A skull profile in the shape the host understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    /// 1.18.1 and newer
    Modern(ModernProfile),
    /// Older hosts
    Legacy(LegacyProfile),
}

impl Profile {
    /// Build a profile for a texture value (URL, base64 or hash)
    pub fn from_texture(texture: &str, capability: ProfileCapability) -> Self {
        let url = skin_url(texture);
        let url = if url.is_empty() { None } else { Some(url) };
        match capability {
            ProfileCapability::PlayerProfiles => {
                let skin_url = url.filter(|u| {
                    let valid = u.starts_with("http://") || u.starts_with("https://");
                    if !valid {
                        log::warn!("Could not set skull skin from malformed URL: {}", u);
                    }
                    valid
                });
                Profile::Modern(ModernProfile {
                    id: Uuid::new_v4(),
                    skin_url,
                })
            }
            ProfileCapability::GameProfiles => Profile::Legacy(LegacyProfile {
                id: Uuid::new_v4(),
                textures: url.map(|u| encode_textures_property(&u)),
            }),
        }
    }

    /// Profile id
    pub fn id(&self) -> Uuid {
        match self {
            Profile::Modern(p) => p.id,
            Profile::Legacy(p) => p.id,
        }
    }

    /// Skin URL carried by the profile
    pub fn skin_url(&self) -> Option<String> {
        match self {
            Profile::Modern(p) => p.skin_url.clone(),
            Profile::Legacy(p) => p
                .textures
                .as_deref()
                .and_then(crate::texture::decode_skin_url),
        }
    }
}
