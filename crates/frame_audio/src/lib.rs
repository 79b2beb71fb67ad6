//! # frame_audio - Slotframe Sounds
//!
//! GUI feedback sounds: descriptor parsing, chained sequences and a registry
//! of named sounds. Playback itself belongs to the host, reached through the
//! [`SoundSink`] trait.

pub mod error;
pub mod registry;
pub mod sound;

pub use error::{Result, SoundError};
pub use registry::SoundRegistry;
pub use sound::{GuiSound, SoundCue, SoundSink, SoundStep};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::registry::SoundRegistry;
    pub use crate::sound::{GuiSound, SoundCue, SoundSink};
}
