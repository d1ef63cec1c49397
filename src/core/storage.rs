//! Local key-value storage for the document, settings and custom styles
//!
//! Every record is overwritten wholesale on save. The file-backed store keeps
//! all keys in one JSON object and rewrites the file on each change.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::config::{STORAGE_CONTENT, STORAGE_CUSTOM_STYLES, STORAGE_SETTINGS};
use super::settings::Settings;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store, starting empty if the file is missing or unreadable
    pub fn open(path: &Path) -> Self {
        let values = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Typed access to the persisted records
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Storage in the platform data directory, or in memory if there is none
    pub fn open_default() -> Self {
        match super::config::project_dirs() {
            Some(dirs) => {
                let path = dirs.data_dir().join("storage.json");
                tracing::info!("Using storage file: {}", path.display());
                Self::new(Box::new(FileStore::open(&path)))
            }
            None => {
                tracing::warn!("No data directory available, storage is not persistent");
                Self::new(Box::new(MemoryStore::default()))
            }
        }
    }

    pub fn save_document(&mut self, content: &str) -> Result<()> {
        self.store.set(STORAGE_CONTENT, content)
    }

    /// Stored document text, if any non-blank text was saved
    pub fn load_document(&self) -> Option<String> {
        self.store
            .get(STORAGE_CONTENT)
            .filter(|content| !content.trim().is_empty())
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.store.set(STORAGE_SETTINGS, &json)
    }

    pub fn load_settings(&self) -> Settings {
        self.store
            .get(STORAGE_SETTINGS)
            .map(|json| Settings::from_json(&json))
            .unwrap_or_default()
    }

    pub fn custom_styles(&self) -> BTreeMap<String, String> {
        self.store
            .get(STORAGE_CUSTOM_STYLES)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save_custom_style(&mut self, name: &str, css: &str) -> Result<()> {
        let mut custom = self.custom_styles();
        custom.insert(name.to_string(), css.to_string());
        self.store
            .set(STORAGE_CUSTOM_STYLES, &serde_json::to_string(&custom)?)
    }

    pub fn delete_custom_style(&mut self, name: &str) -> Result<()> {
        let mut custom = self.custom_styles();
        custom.remove(name);
        self.store
            .set(STORAGE_CUSTOM_STYLES, &serde_json::to_string(&custom)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::i18n::Language;
    use crate::core::settings::Theme;

    fn memory() -> Storage {
        Storage::new(Box::new(MemoryStore::default()))
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut storage = memory();
        let settings = Settings {
            style: "pdf_formal".to_string(),
            lang: Language::En,
            theme: Theme::Light,
            editor_zoom: 20,
            preview_zoom: 12,
        };
        storage.save_settings(&settings).unwrap();
        assert_eq!(storage.load_settings(), settings);
    }

    #[test]
    fn test_missing_settings_are_default() {
        assert_eq!(memory().load_settings(), Settings::default());
    }

    #[test]
    fn test_blank_document_not_restored() {
        let mut storage = memory();
        assert_eq!(storage.load_document(), None);
        storage.save_document("  \n\t").unwrap();
        assert_eq!(storage.load_document(), None);
        storage.save_document("# Hi").unwrap();
        assert_eq!(storage.load_document().as_deref(), Some("# Hi"));
    }

    #[test]
    fn test_custom_styles() {
        let mut storage = memory();
        storage.save_custom_style("Mine", "body { color: red; } ").unwrap();
        storage.save_custom_style("Other", "p { margin: 0; } ").unwrap();
        storage.delete_custom_style("Other").unwrap();

        let custom = storage.custom_styles();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom["Mine"], "body { color: red; } ");
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("storage.json");

        let settings = Settings {
            theme: Theme::Light,
            ..Settings::default()
        };
        {
            let mut storage = Storage::new(Box::new(FileStore::open(&path)));
            storage.save_document("hello").unwrap();
            storage.save_settings(&settings).unwrap();
        }

        let storage = Storage::new(Box::new(FileStore::open(&path)));
        assert_eq!(storage.load_document().as_deref(), Some("hello"));
        assert_eq!(storage.load_settings(), settings);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get(STORAGE_CONTENT), None);
        store.set(STORAGE_CONTENT, "x").unwrap();
        assert_eq!(FileStore::open(&path).get(STORAGE_CONTENT).as_deref(), Some("x"));
    }
}
