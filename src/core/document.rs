//! The Markdown document being edited

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::DEFAULT_FILE_NAME;

/// The editable document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document content
    pub content: String,
    /// File the document was last opened from or saved to
    pub path: Option<PathBuf>,
    /// Content as of the last open/save
    last_saved: String,
}

impl Document {
    /// Document restored from storage or freshly generated; not tied to a file
    pub fn new(content: String) -> Self {
        Self {
            content,
            path: None,
            last_saved: String::new(),
        }
    }

    /// Open a document from a file
    pub fn open(path: &Path) -> Result<Self> {
        let content = super::import::read_text_file(path)?;
        Ok(Self {
            last_saved: content.clone(),
            content,
            path: Some(path.to_path_buf()),
        })
    }

    /// Write the document to `path`, adding `.md` when it has no extension
    pub fn save_to(&mut self, path: &Path) -> Result<PathBuf> {
        let path = with_markdown_extension(path);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to save file: {}", path.display()))?;
        tracing::info!("Saved document: {}", path.display());

        self.last_saved = self.content.clone();
        self.path = Some(path.clone());
        Ok(path)
    }

    /// Replace the content with a new unsaved document
    pub fn reset(&mut self, content: String) {
        self.content = content;
        self.path = None;
        self.last_saved.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.content != self.last_saved
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// File name shown in the title bar and suggested by the save dialog
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
    }

    /// File name without extension, for export suggestions
    pub fn base_name(&self) -> String {
        Path::new(&self.display_name())
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string())
    }

    pub fn directory(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

fn with_markdown_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_dirty_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Notes\n").unwrap();

        let mut doc = Document::open(&path).unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(doc.display_name(), "notes.md");
        assert_eq!(doc.base_name(), "notes");

        doc.content.push_str("more");
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_save_adds_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new("hello".to_string());
        assert!(doc.is_dirty());

        let saved = doc.save_to(&dir.path().join("draft")).unwrap();
        assert_eq!(saved, dir.path().join("draft.md"));
        assert_eq!(fs::read_to_string(&saved).unwrap(), "hello");
        assert!(!doc.is_dirty());
        assert_eq!(doc.directory(), Some(dir.path()));
    }

    #[test]
    fn test_reset_and_defaults() {
        let mut doc = Document::new(String::new());
        assert_eq!(doc.display_name(), DEFAULT_FILE_NAME);
        assert_eq!(doc.base_name(), "documento");

        doc.reset("ñandú".to_string());
        assert_eq!(doc.char_count(), 5);
        assert!(doc.path.is_none());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Document::open(&dir.path().join("missing.md")).is_err());
    }
}
