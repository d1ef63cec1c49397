//! HTML export to a file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// First free path among `base.ext`, `base (1).ext`, `base (2).ext`, ...
pub fn unique_path(dir: &Path, base: &str, ext: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.{}", base, ext));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| dir.join(format!("{} ({}).{}", base, n, ext)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Write a complete HTML document next to other exports, never overwriting
pub fn export_html(html: &str, dir: &Path, base: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let path = unique_path(dir, base, "html");
    fs::write(&path, html).with_context(|| format!("Failed to write file: {}", path.display()))?;
    tracing::info!("Exported HTML: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_path_sequence() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_path(dir.path(), "doc", "html"), dir.path().join("doc.html"));

        let first = export_html("<p>1</p>", dir.path(), "doc").unwrap();
        let second = export_html("<p>2</p>", dir.path(), "doc").unwrap();
        let third = export_html("<p>3</p>", dir.path(), "doc").unwrap();

        assert_eq!(first, dir.path().join("doc.html"));
        assert_eq!(second, dir.path().join("doc (1).html"));
        assert_eq!(third, dir.path().join("doc (2).html"));
        assert_eq!(fs::read_to_string(first).unwrap(), "<p>1</p>");
    }

    #[test]
    fn test_export_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = export_html("<html></html>", &nested, "out").unwrap();
        assert!(path.exists());
    }
}
