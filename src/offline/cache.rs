//! Versioned on-disk asset cache
//!
//! Each build owns a cache directory named `md-editor-v<version>` under the
//! cache root. The `ACTIVE` marker file names the generation currently in
//! charge; activating a generation evicts every other one.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::fetch::Fetcher;
use crate::core::config::CACHE_PREFIX;

const ACTIVE_MARKER: &str = "ACTIVE";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not available offline: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// Lifecycle of a cache generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Installing,
    /// Installed while another generation is still active
    Waiting,
    Active,
}

/// Asset bytes and where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub from_cache: bool,
}

pub struct AssetCache {
    root: PathBuf,
    name: String,
    state: CacheState,
    fetcher: Box<dyn Fetcher>,
}

impl AssetCache {
    pub fn new(root: &Path, name: &str, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            root: root.to_path_buf(),
            name: name.to_string(),
            state: CacheState::Installing,
            fetcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    fn dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    fn entry_path(dir: &Path, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        dir.join(hex::encode(hasher.finalize()))
    }

    /// Name of the generation recorded as active, if any
    pub fn active(&self) -> Option<String> {
        fs::read_to_string(self.root.join(ACTIVE_MARKER))
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    fn store(&self, url: &str, bytes: &[u8]) -> Result<()> {
        let dir = self.dir();
        fs::create_dir_all(&dir)?;
        fs::write(Self::entry_path(&dir, url), bytes)?;
        Ok(())
    }

    fn read(dir: &Path, url: &str) -> Option<Vec<u8>> {
        fs::read(Self::entry_path(dir, url)).ok()
    }

    /// Pre-cache `assets`, then activate unless another generation is active
    pub fn install(&mut self, assets: &[String]) -> Result<CacheState> {
        self.state = CacheState::Installing;
        fs::create_dir_all(self.dir())?;

        let mut cached = 0;
        for url in assets {
            match self.fetcher.fetch(url).and_then(|bytes| self.store(url, &bytes)) {
                Ok(()) => cached += 1,
                Err(e) => tracing::warn!("Skipping asset during install: {}", e),
            }
        }
        tracing::info!("Installed cache {} ({}/{} assets)", self.name, cached, assets.len());

        match self.active() {
            Some(active) if active != self.name => {
                tracing::info!("Cache {} waiting, {} is still active", self.name, active);
                self.state = CacheState::Waiting;
            }
            _ => {
                self.activate()?;
            }
        }
        Ok(self.state)
    }

    /// Make this generation active and evict every other one. Returns the evicted names.
    pub fn activate(&mut self) -> Result<Vec<String>> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(ACTIVE_MARKER), &self.name)?;

        let mut evicted = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(CACHE_PREFIX) && name != self.name && entry.path().is_dir() {
                match fs::remove_dir_all(entry.path()) {
                    Ok(()) => {
                        tracing::info!("Evicted cache {}", name);
                        evicted.push(name);
                    }
                    Err(e) => tracing::warn!("Failed to evict cache {}: {}", name, e),
                }
            }
        }

        self.state = CacheState::Active;
        tracing::info!("Activated cache {}", self.name);
        Ok(evicted)
    }

    /// Cached bytes for `url`: this generation first, then the active one
    pub fn lookup(&self, url: &str) -> Option<Vec<u8>> {
        if let Some(bytes) = Self::read(&self.dir(), url) {
            return Some(bytes);
        }
        self.active()
            .filter(|active| *active != self.name)
            .and_then(|active| Self::read(&self.root.join(active), url))
    }

    /// Network first; a successful response refreshes the cache, a failure falls back to it
    pub fn fetch(&self, url: &str) -> Result<Fetched> {
        match self.fetcher.fetch(url) {
            Ok(bytes) => {
                if let Err(e) = self.store(url, &bytes) {
                    tracing::warn!("Failed to cache {}: {}", url, e);
                }
                Ok(Fetched {
                    bytes,
                    from_cache: false,
                })
            }
            Err(e) => {
                tracing::debug!("Network fetch failed, trying cache: {}", e);
                self.lookup(url)
                    .map(|bytes| Fetched {
                        bytes,
                        from_cache: true,
                    })
                    .ok_or_else(|| CacheError::Unavailable(url.to_string()))
            }
        }
    }
}
