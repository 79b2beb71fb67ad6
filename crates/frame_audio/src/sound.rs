//! Sound descriptors
//!
//! A descriptor is a comma separated string `"name, pitch, volume, delay"`.
//! Every field but the name is optional. Unsuffixed numbers are read by
//! position; a suffix pins a number to a field regardless of position:
//!
//! | suffix | field  |
//! |--------|--------|
//! | `p`    | pitch  |
//! | `v`    | volume |
//! | `d`/`t`| delay in ticks |
//!
//! `"PLING, 1.5p, 0.8v, 20t"` and `"PLING, 1.5, 0.8, 20"` describe the same
//! sound.

use crate::error::{Result, SoundError};
use frame_core::ViewerId;
use serde::{Deserialize, Serialize};

/// One playable sound with its pitch and volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    /// Host sound key, e.g. `BLOCK_NOTE_BLOCK_PLING`
    pub name: String,
    /// Pitch multiplier
    pub pitch: f32,
    /// Volume
    pub volume: f32,
}

impl SoundCue {
    /// Create a cue with unit pitch and volume
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// A cue and its delay relative to the previous step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundStep {
    /// What to play
    pub cue: SoundCue,
    /// Ticks to wait after the previous step
    pub delay: u64,
}

impl SoundStep {
    /// Parse a single descriptor
    pub fn parse(descriptor: &str) -> Result<Self> {
        let mut fields = descriptor.split(',').map(str::trim);
        let name = match fields.next() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(SoundError::MissingName(descriptor.to_string())),
        };

        let mut step = SoundStep {
            cue: SoundCue::new(name),
            delay: 0,
        };

        for (position, token) in fields.enumerate() {
            if token.is_empty() {
                continue;
            }
            let lower = token.to_ascii_lowercase();
            let (field, number) = match lower.chars().last() {
                Some('p') => (Field::Pitch, &lower[..lower.len() - 1]),
                Some('v') => (Field::Volume, &lower[..lower.len() - 1]),
                Some('d') | Some('t') => (Field::Delay, &lower[..lower.len() - 1]),
                _ => match position {
                    0 => (Field::Pitch, lower.as_str()),
                    1 => (Field::Volume, lower.as_str()),
                    2 => (Field::Delay, lower.as_str()),
                    _ => return Err(SoundError::TooManyFields(descriptor.to_string())),
                },
            };
            let invalid = || SoundError::InvalidNumber {
                token: token.to_string(),
                descriptor: descriptor.to_string(),
            };
            match field {
                Field::Pitch => step.cue.pitch = number.trim().parse().map_err(|_| invalid())?,
                Field::Volume => step.cue.volume = number.trim().parse().map_err(|_| invalid())?,
                Field::Delay => step.delay = number.trim().parse().map_err(|_| invalid())?,
            }
        }
        Ok(step)
    }

    /// Render back to a descriptor string
    pub fn to_descriptor(&self) -> String {
        format!(
            "{}, {}p, {}v, {}t",
            self.cue.name, self.cue.pitch, self.cue.volume, self.delay
        )
    }
}

enum Field {
    Pitch,
    Volume,
    Delay,
}

/// Receiver of scheduled sounds. The host implements this and owns the
/// actual delay scheduling.
pub trait SoundSink {
    /// Play `cue` for `viewer` after `delay_ticks`
    fn play_sound(&mut self, viewer: ViewerId, cue: &SoundCue, delay_ticks: u64);
}

/// A sound played on GUI events: zero or more steps played in sequence.
///
/// An empty sound is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SoundValue", into = "SoundValue")]
pub struct GuiSound {
    steps: Vec<SoundStep>,
}

impl GuiSound {
    /// The silent sound
    pub fn none() -> Self {
        Self::default()
    }

    /// A single cue without delay
    pub fn cue(name: impl Into<String>) -> Self {
        Self {
            steps: vec![SoundStep {
                cue: SoundCue::new(name),
                delay: 0,
            }],
        }
    }

    /// Parse a single descriptor. A blank descriptor yields the silent sound.
    pub fn parse(descriptor: &str) -> Result<Self> {
        if descriptor.trim().is_empty() {
            return Ok(Self::none());
        }
        Ok(Self {
            steps: vec![SoundStep::parse(descriptor)?],
        })
    }

    /// Create from explicit steps
    pub fn from_steps(steps: Vec<SoundStep>) -> Self {
        Self { steps }
    }

    /// Append another sound after this one
    pub fn then(mut self, other: GuiSound) -> Self {
        self.steps.extend(other.steps);
        self
    }

    /// Check if this sound plays nothing
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in play order
    pub fn steps(&self) -> &[SoundStep] {
        &self.steps
    }

    /// Each cue with its delay counted from the first step
    pub fn schedule(&self) -> Vec<(&SoundCue, u64)> {
        let mut elapsed = 0u64;
        self.steps
            .iter()
            .map(|step| {
                elapsed = elapsed.saturating_add(step.delay);
                (&step.cue, elapsed)
            })
            .collect()
    }

    /// Hand every step to `sink`. Returns false for the silent sound.
    pub fn play<S: SoundSink + ?Sized>(&self, viewer: ViewerId, sink: &mut S) -> bool {
        if self.is_empty() {
            return false;
        }
        for (cue, delay) in self.schedule() {
            sink.play_sound(viewer, cue, delay);
        }
        true
    }
}

/// Serialized shape: one descriptor or a list of them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SoundValue {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<SoundValue> for GuiSound {
    type Error = SoundError;

    fn try_from(value: SoundValue) -> Result<Self> {
        match value {
            SoundValue::One(descriptor) => GuiSound::parse(&descriptor),
            SoundValue::Many(list) => list
                .iter()
                .map(|d| SoundStep::parse(d))
                .collect::<Result<Vec<_>>>()
                .map(GuiSound::from_steps),
        }
    }
}

impl From<GuiSound> for SoundValue {
    fn from(sound: GuiSound) -> Self {
        match sound.steps.as_slice() {
            [] => SoundValue::One(String::new()),
            [step] => SoundValue::One(step.to_descriptor()),
            steps => SoundValue::Many(steps.iter().map(SoundStep::to_descriptor).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(String, u64)>);

    impl SoundSink for Recorder {
        fn play_sound(&mut self, _viewer: ViewerId, cue: &SoundCue, delay_ticks: u64) {
            self.0.push((cue.name.clone(), delay_ticks));
        }
    }

    #[test]
    fn test_parse_suffixed() {
        let step = SoundStep::parse("PLING, 1.5p, 0.8v, 20t").unwrap();
        assert_eq!(step.cue.name, "PLING");
        assert_eq!(step.cue.pitch, 1.5);
        assert_eq!(step.cue.volume, 0.8);
        assert_eq!(step.delay, 20);
    }

    #[test]
    fn test_parse_positional() {
        let step = SoundStep::parse("PLING, 2.0, 0.5").unwrap();
        assert_eq!(step.cue.pitch, 2.0);
        assert_eq!(step.cue.volume, 0.5);
        assert_eq!(step.delay, 0);
    }

    #[test]
    fn test_suffix_overrides_position() {
        let step = SoundStep::parse("CLICK, 0.3v, 5d").unwrap();
        assert_eq!(step.cue.pitch, 1.0);
        assert_eq!(step.cue.volume, 0.3);
        assert_eq!(step.delay, 5);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(SoundStep::parse(", 1.0"), Err(SoundError::MissingName(_))));
        assert!(matches!(
            SoundStep::parse("PLING, loud"),
            Err(SoundError::InvalidNumber { .. })
        ));
        assert!(matches!(
            SoundStep::parse("PLING, 1, 1, 1, 1"),
            Err(SoundError::TooManyFields(_))
        ));
    }

    #[test]
    fn test_blank_is_silent() {
        let sound = GuiSound::parse("  ").unwrap();
        assert!(sound.is_empty());
        let mut sink = Recorder::default();
        assert!(!sound.play(ViewerId::random(), &mut sink));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_chain_accumulates_delay() {
        let sound = GuiSound::parse("A, 1.0, 1.0, 2")
            .unwrap()
            .then(GuiSound::parse("B, 1.0, 1.0, 3").unwrap())
            .then(GuiSound::cue("C"));
        let mut sink = Recorder::default();
        assert!(sound.play(ViewerId::random(), &mut sink));
        assert_eq!(
            sink.0,
            vec![("A".to_string(), 2), ("B".to_string(), 5), ("C".to_string(), 5)]
        );
    }

    #[test]
    fn test_serde_shapes() {
        #[derive(Deserialize)]
        struct Doc {
            one: GuiSound,
            many: GuiSound,
        }
        let doc: Doc = toml::from_str(
            r#"
            one = "PLING, 2.0"
            many = ["A", "B, 1.0, 1.0, 4"]
            "#,
        )
        .unwrap();
        assert_eq!(doc.one.steps()[0].cue.pitch, 2.0);
        assert_eq!(doc.many.steps().len(), 2);
    }
}
