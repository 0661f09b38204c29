use std::{
    collections::BTreeMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::core::FlashcardError;

/// String-keyed, string-valued storage. Values survive restarts for
/// implementations backed by disk.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FlashcardError>;
    fn remove(&mut self, key: &str) -> Result<(), FlashcardError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FlashcardError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FlashcardError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens `path`, treating a missing or malformed file as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Ignoring unreadable state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, FlashcardError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn flush(&self) -> Result<(), FlashcardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FlashcardError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), FlashcardError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
