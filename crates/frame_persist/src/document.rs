//! TOML documents addressed by dotted paths
//!
//! `shop.items.4` names the table `4` inside `items` inside `shop`. An empty
//! path is the document root.

use crate::error::{PersistError, Result};
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// A TOML document, optionally backed by a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    path: Option<PathBuf>,
    root: Table,
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn split_last(path: &str) -> (&str, &str) {
    path.rsplit_once('.').unwrap_or(("", path))
}

impl ConfigDocument {
    /// Empty in-memory document
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory document parsed from `text`
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            path: None,
            root: toml::from_str(text)?,
        })
    }

    /// Load `path`. A missing file gives an empty document that is created on
    /// the first save.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let root = if path.exists() {
            toml::from_str(&std::fs::read_to_string(path)?)?
        } else {
            log::debug!("{} does not exist yet, starting empty", path.display());
            Table::new()
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            root,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Re-read the backing file. Returns false when there is none.
    pub fn reload(&mut self) -> Result<bool> {
        let Some(path) = self.path.as_ref().filter(|p| p.exists()) else {
            return Ok(false);
        };
        self.root = toml::from_str(&std::fs::read_to_string(path)?)?;
        Ok(true)
    }

    /// Write to the backing file; in-memory documents are left alone
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.root)?)
    }

    /// Value at `path`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (parent, key) = split_last(path);
        self.table(parent)?.get(key)
    }

    /// Table at `path`
    pub fn table(&self, path: &str) -> Option<&Table> {
        segments(path).try_fold(&self.root, |table, key| table.get(key)?.as_table())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    fn table_mut(&mut self, path: &str) -> Option<&mut Table> {
        let mut table = &mut self.root;
        for key in segments(path) {
            table = table.get_mut(key)?.as_table_mut()?;
        }
        Some(table)
    }

    /// Table at `path`, created along with any missing parents
    pub fn section_mut(&mut self, path: &str) -> Result<&mut Table> {
        let mut table = &mut self.root;
        for key in segments(path) {
            let entry = table.entry(key).or_insert(Value::Table(Table::new()));
            table = match entry {
                Value::Table(inner) => inner,
                _ => return Err(PersistError::NotATable(path.to_string())),
            };
        }
        Ok(table)
    }

    /// Replace whatever is at `path` with an empty table
    pub fn create_section(&mut self, path: &str) -> Result<&mut Table> {
        let (parent, key) = split_last(path);
        if key.is_empty() {
            self.root.clear();
            return Ok(&mut self.root);
        }
        let parent = self.section_mut(parent)?;
        parent.insert(key.to_string(), Value::Table(Table::new()));
        match parent.get_mut(key) {
            Some(Value::Table(table)) => Ok(table),
            _ => Err(PersistError::NotATable(path.to_string())),
        }
    }

    /// Set the value at `path`, creating parent tables
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let (parent, key) = split_last(path);
        self.section_mut(parent)?.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parent, key) = split_last(path);
        self.table_mut(parent)?.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_paths() {
        let mut doc = ConfigDocument::parse("[shop]\ntitle = \"Shop\"\n").unwrap();
        assert_eq!(doc.get("shop.title").and_then(Value::as_str), Some("Shop"));
        assert!(doc.get("shop.rows").is_none());

        doc.set("shop.items.4.name", "Sword").unwrap();
        assert_eq!(doc.get("shop.items.4.name").and_then(Value::as_str), Some("Sword"));
        assert!(doc.table("shop.items").is_some());
    }

    #[test]
    fn test_scalar_in_the_way() {
        let mut doc = ConfigDocument::parse("shop = 3").unwrap();
        assert!(matches!(doc.set("shop.title", "x"), Err(PersistError::NotATable(_))));
    }

    #[test]
    fn test_create_section_replaces() {
        let mut doc = ConfigDocument::parse("[a.b]\nx = 1\n").unwrap();
        doc.create_section("a.b").unwrap().insert("y".into(), Value::Integer(2));
        assert!(!doc.contains("a.b.x"));
        assert!(doc.contains("a.b.y"));
    }

    #[test]
    fn test_remove() {
        let mut doc = ConfigDocument::parse("[a]\nx = 1\n").unwrap();
        assert_eq!(doc.remove("a.x"), Some(Value::Integer(1)));
        assert_eq!(doc.remove("a.x"), None);
        assert_eq!(doc.remove("missing.x"), None);
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let doc = ConfigDocument::new();
        assert!(doc.save().is_ok());
        assert!(doc.path().is_none());
    }
}
