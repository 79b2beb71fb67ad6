//! Named sounds loaded from a document
//!
//! ```toml
//! click = "UI_BUTTON_CLICK, 1.2"
//! fanfare = ["NOTE_PLING, 1.0", "NOTE_PLING, 1.5, 1.0, 4", "NOTE_PLING, 2.0, 1.0, 4"]
//! confirm = ["click", "fanfare"]
//!
//! [menu]
//! open = "fanfare"
//! ```
//!
//! Entries are either descriptors or references to other entries (aliases).
//! Nested tables produce dotted ids (`menu.open`).

use crate::error::{Result, SoundError};
use crate::sound::GuiSound;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Raw entry before alias resolution
#[derive(Debug, Clone)]
enum RawEntry {
    One(String),
    Many(Vec<String>),
}

/// Registry of named sounds
#[derive(Debug, Clone, Default)]
pub struct SoundRegistry {
    sounds: HashMap<String, GuiSound>,
}

impl SoundRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)?;
        let mut raw = BTreeMap::new();
        collect_entries("", &table, &mut raw)?;

        let mut registry = Self::new();
        for id in raw.keys() {
            let mut visiting = HashSet::new();
            let sound = resolve(id, &raw, &mut visiting)?;
            registry.sounds.insert(id.clone(), sound);
        }
        log::debug!("Loaded {} sounds", registry.sounds.len());
        Ok(registry)
    }

    /// Register a sound under `id`
    pub fn insert(&mut self, id: impl Into<String>, sound: GuiSound) {
        self.sounds.insert(id.into(), sound);
    }

    /// Get a copy of a registered sound
    pub fn get(&self, id: &str) -> Option<GuiSound> {
        self.sounds.get(id).cloned()
    }

    /// Resolve a registered id, or parse `descriptor` as a descriptor
    pub fn load_sound(&self, descriptor: &str) -> Result<GuiSound> {
        match self.get(descriptor.trim()) {
            Some(sound) => Ok(sound),
            None => GuiSound::parse(descriptor),
        }
    }

    /// Resolve a list of ids and descriptors into one chained sound
    pub fn load_sequence<S: AsRef<str>>(&self, parts: &[S]) -> Result<GuiSound> {
        parts.iter().try_fold(GuiSound::none(), |acc, part| {
            Ok(acc.then(self.load_sound(part.as_ref())?))
        })
    }

    /// Registered ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(String::as_str)
    }

    /// Number of registered sounds
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

fn collect_entries(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, RawEntry>) -> Result<()> {
    for (key, value) in table {
        let id = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(s) => {
                out.insert(id, RawEntry::One(s.clone()));
            }
            toml::Value::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| SoundError::InvalidEntry(id.clone()))
                    })
                    .collect::<Result<Vec<_>>>()?;
                out.insert(id, RawEntry::Many(parts));
            }
            toml::Value::Table(nested) => collect_entries(&id, nested, out)?,
            _ => return Err(SoundError::InvalidEntry(id)),
        }
    }
    Ok(())
}

fn resolve(id: &str, raw: &BTreeMap<String, RawEntry>, visiting: &mut HashSet<String>) -> Result<GuiSound> {
    if !visiting.insert(id.to_string()) {
        return Err(SoundError::AliasCycle(id.to_string()));
    }
    let parts: Vec<&str> = match raw.get(id) {
        Some(RawEntry::One(s)) => vec![s.as_str()],
        Some(RawEntry::Many(list)) => list.iter().map(String::as_str).collect(),
        None => return Err(SoundError::UnknownSound(id.to_string())),
    };

    let mut sound = GuiSound::none();
    for part in parts {
        let key = part.trim();
        let next = if key != id && raw.contains_key(key) {
            resolve(key, raw, visiting)?
        } else {
            GuiSound::parse(part)?
        };
        sound = sound.then(next);
    }
    visiting.remove(id);
    Ok(sound)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        click = "UI_BUTTON_CLICK, 1.2"
        fanfare = ["PLING, 1.0", "PLING, 1.5, 1.0, 4", "PLING, 2.0, 1.0, 4"]
        confirm = ["click", "fanfare"]

        [menu]
        open = "fanfare"
    "#;

    #[test]
    fn test_load_descriptors_and_aliases() {
        let registry = SoundRegistry::from_toml_str(DOC).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("click").unwrap().steps()[0].cue.pitch, 1.2);
        assert_eq!(registry.get("menu.open"), registry.get("fanfare"));
    }

    #[test]
    fn test_sequence_cumulative_delay() {
        let registry = SoundRegistry::from_toml_str(DOC).unwrap();
        let confirm = registry.get("confirm").unwrap();
        let delays: Vec<u64> = confirm.schedule().into_iter().map(|(_, d)| d).collect();
        assert_eq!(delays, vec![0, 0, 4, 8]);
    }

    #[test]
    fn test_get_returns_copy() {
        let registry = SoundRegistry::from_toml_str(DOC).unwrap();
        let mut copy = registry.get("click").unwrap();
        copy = copy.then(GuiSound::cue("EXTRA"));
        assert_eq!(copy.steps().len(), 2);
        assert_eq!(registry.get("click").unwrap().steps().len(), 1);
    }

    #[test]
    fn test_load_sound_falls_back_to_descriptor() {
        let registry = SoundRegistry::from_toml_str(DOC).unwrap();
        assert_eq!(registry.load_sound("click").unwrap(), registry.get("click").unwrap());
        let parsed = registry.load_sound("BELL, 0.5").unwrap();
        assert_eq!(parsed.steps()[0].cue.name, "BELL");
        let seq = registry.load_sequence(&["click", "BELL, 1.0, 1.0, 10"]).unwrap();
        assert_eq!(seq.schedule()[1].1, 10);
    }

    #[test]
    fn test_alias_cycle_rejected() {
        let err = SoundRegistry::from_toml_str("a = \"b\"\nb = \"a\"").unwrap_err();
        assert!(matches!(err, SoundError::AliasCycle(_)));
    }

    #[test]
    fn test_invalid_entry() {
        let err = SoundRegistry::from_toml_str("a = 3").unwrap_err();
        assert!(matches!(err, SoundError::InvalidEntry(_)));
    }
}
