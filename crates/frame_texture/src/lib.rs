//! # frame_texture - Slotframe Skull Textures
//!
//! Resolves item texture strings into something the host can put on a
//! skull: the viewer, another player, or a profile carrying a skin URL.
//! Profiles come in two shapes selected once per server by
//! [`ProfileCapability`] and are cached by texture string.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod profile;
pub mod texture;

pub use cache::{ProfileCache, TextureCache};
pub use error::{Result, TextureError};
pub use fetch::{CachedTextures, HttpClient, SessionServerFetcher, TextureFetcher};
pub use profile::{LegacyProfile, ModernProfile, Profile, ProfileCapability};
pub use texture::{resolve_skull, skin_url, SkullOwner, TextureRef};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::ProfileCache;
    pub use crate::profile::{Profile, ProfileCapability};
    pub use crate::texture::{resolve_skull, SkullOwner};
}
