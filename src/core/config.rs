//! Application constants and on-disk configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "Markdown Editor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage key for the document text
pub const STORAGE_CONTENT: &str = "md_editor_content";
/// Storage key for the settings record
pub const STORAGE_SETTINGS: &str = "md_editor_settings";
/// Storage key for user-defined styles
pub const STORAGE_CUSTOM_STYLES: &str = "md_custom_styles";

pub const PREVIEW_DEBOUNCE: Duration = Duration::from_millis(300);
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const SAVED_INDICATOR_DURATION: Duration = Duration::from_millis(2000);
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Name used when saving a document that has never been saved
pub const DEFAULT_FILE_NAME: &str = "documento.md";

/// Prefix shared by every asset cache generation
pub const CACHE_PREFIX: &str = "md-editor-";

const MAX_RECENT_FILES: usize = 10;

/// Versioned name of the asset cache for this build
pub fn cache_name() -> String {
    format!("{}v{}", CACHE_PREFIX, APP_VERSION)
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "md-editor", "MdEditor")
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recently opened or saved files, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Directory suggested by file dialogs
    pub last_directory: Option<PathBuf>,
    /// Offline asset cache settings
    pub offline: OfflineConfig,
}

/// Offline cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    /// Run the background cache worker
    pub enabled: bool,
    /// Network timeout for asset fetches, in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            last_directory: None,
            offline: OfflineConfig::default(),
        }
    }
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fetch_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Record a file as most recently used
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        if let Some(parent) = path.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    pub fn remove_recent_file(&mut self, path: &Path) {
        self.recent_files.retain(|p| p != path);
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_files_dedup_and_limit() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_file(PathBuf::from(format!("/notes/{}.md", i)));
        }
        config.add_recent_file(PathBuf::from("/notes/5.md"));

        assert_eq!(config.recent_files.len(), 10);
        assert_eq!(config.recent_files[0], PathBuf::from("/notes/5.md"));
        assert_eq!(
            config.recent_files.iter().filter(|p| p.ends_with("5.md")).count(),
            1
        );
        assert_eq!(config.last_directory, Some(PathBuf::from("/notes")));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.add_recent_file(PathBuf::from("/tmp/a.md"));
        config.offline.enabled = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.recent_files, config.recent_files);
        assert!(!loaded.offline.enabled);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"recent_files": ["/x.md"]}"#).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.recent_files, vec![PathBuf::from("/x.md")]);
        assert!(loaded.offline.enabled);
        assert_eq!(loaded.offline.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_cache_name_is_versioned() {
        assert_eq!(cache_name(), format!("md-editor-v{}", APP_VERSION));
    }
}
