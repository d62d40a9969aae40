//! Asset scanner.
//!
//! Walks the library root for video files and reads each asset's subtitle
//! inventory from the sidecars sitting next to it. Inventories are read
//! fresh at scan time; nothing is cached between runs.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::asset::{Asset, SubtitleInventory};
use crate::error::{Result, SubfillError};
use crate::language::LanguageCode;

pub struct AssetScanner {
    video_extensions: Vec<String>,
}

impl AssetScanner {
    pub fn new(video_extensions: Vec<String>) -> Self {
        Self { video_extensions }
    }

    /// Enumerate all video assets under a library root, each with a
    /// freshly-read inventory.
    pub fn scan_library(&self, root: &Path) -> Result<Vec<Asset>> {
        if !root.is_dir() {
            return Err(SubfillError::Config(format!(
                "Library path is not a directory: {}",
                root.display()
            )));
        }

        let mut assets = Vec::new();

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() && self.is_video(path) {
                assets.push(self.scan_asset(path)?);
            }
        }

        info!("Found {} video assets under {}", assets.len(), root.display());
        Ok(assets)
    }

    /// Build one asset from a media path, reading its current inventory
    pub fn scan_asset(&self, path: &Path) -> Result<Asset> {
        if !path.exists() {
            return Err(SubfillError::FileNotFound(path.display().to_string()));
        }

        let inventory = read_inventory(path)?;
        debug!(
            "Asset {} holds {} subtitle language(s)",
            path.display(),
            inventory.len()
        );

        Ok(Asset::new(path.to_path_buf(), inventory))
    }

    fn is_video(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.video_extensions.iter().any(|v| v == &ext)
            })
            .unwrap_or(false)
    }
}

/// Read the sidecar inventory for a media file: every sibling named
/// `<asset-stem>.<code>.srt` counts, whatever the language code is.
fn read_inventory(media_path: &Path) -> Result<SubtitleInventory> {
    let mut inventory = SubtitleInventory::new();

    let stem = match media_path.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => return Ok(inventory),
    };
    let parent = match media_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => return Ok(inventory),
    };

    for entry in std::fs::read_dir(&parent)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(code) = sidecar_language(&stem, &file_name) {
            inventory.insert(LanguageCode::from(code), entry.path());
        }
    }

    Ok(inventory)
}

/// Extract the language code from a sidecar filename, or None when the file
/// does not follow the `<stem>.<code>.srt` convention for this asset.
fn sidecar_language<'a>(stem: &str, file_name: &'a str) -> Option<&'a str> {
    let rest = file_name.strip_prefix(stem)?.strip_prefix('.')?;
    let code = rest.strip_suffix(".srt")?;

    if code.is_empty() || code.contains('.') {
        return None;
    }

    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"content").unwrap();
    }

    #[test]
    fn test_sidecar_language_parsing() {
        assert_eq!(sidecar_language("movie", "movie.en.srt"), Some("en"));
        assert_eq!(sidecar_language("a.b", "a.b.pt-BR.srt"), Some("pt-BR"));
        assert_eq!(sidecar_language("movie", "movie.srt"), None);
        assert_eq!(sidecar_language("movie", "movie.en.ar.srt"), None);
        assert_eq!(sidecar_language("movie", "other.en.srt"), None);
        assert_eq!(sidecar_language("movie", "movie.en.txt"), None);
    }

    #[test]
    fn test_scan_asset_reads_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("episode.mkv");
        touch(&media);
        touch(&dir.path().join("episode.en.srt"));
        touch(&dir.path().join("episode.fr.srt"));
        touch(&dir.path().join("unrelated.ar.srt"));

        let scanner = AssetScanner::new(vec!["mkv".to_string()]);
        let asset = scanner.scan_asset(&media).unwrap();

        assert!(asset.inventory().contains(&"en".into()));
        assert!(asset.inventory().contains(&"fr".into()));
        assert_eq!(asset.inventory().len(), 2);
    }

    #[test]
    fn test_scan_library_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("movie.mp4"));
        touch(&dir.path().join("show.MKV"));
        touch(&dir.path().join("notes.txt"));

        let scanner = AssetScanner::new(vec!["mp4".to_string(), "mkv".to_string()]);
        let assets = scanner.scan_library(dir.path()).unwrap();

        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn test_scan_library_recurses_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("season1");
        fs::create_dir(&nested).unwrap();
        touch(&nested.join("e01.mp4"));
        touch(&nested.join("e01.nl.srt"));

        let scanner = AssetScanner::new(vec!["mp4".to_string()]);
        let assets = scanner.scan_library(dir.path()).unwrap();

        assert_eq!(assets.len(), 1);
        assert!(assets[0].inventory().contains(&"nl".into()));
    }

    #[test]
    fn test_scan_missing_file_fails() {
        let scanner = AssetScanner::new(vec!["mp4".to_string()]);
        assert!(scanner.scan_asset(Path::new("/nonexistent/file.mp4")).is_err());
    }
}
