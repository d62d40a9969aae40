use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::language::LanguageCode;

/// Mapping from language to the subtitle sidecar currently on disk for one
/// asset. Membership is all the resolver consumes; content stays opaque.
#[derive(Debug, Clone, Default)]
pub struct SubtitleInventory {
    entries: BTreeMap<LanguageCode, PathBuf>,
}

impl SubtitleInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: LanguageCode, path: PathBuf) {
        self.entries.insert(language, path);
    }

    pub fn contains(&self, language: &LanguageCode) -> bool {
        self.entries.contains_key(language)
    }

    pub fn path(&self, language: &LanguageCode) -> Option<&Path> {
        self.entries.get(language).map(PathBuf::as_path)
    }

    /// Languages currently held, in sorted order
    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.entries.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One media file under management, identified by its path.
#[derive(Debug, Clone)]
pub struct Asset {
    path: PathBuf,
    inventory: SubtitleInventory,
}

impl Asset {
    pub fn new(path: PathBuf, inventory: SubtitleInventory) -> Self {
        Self { path, inventory }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inventory(&self) -> &SubtitleInventory {
        &self.inventory
    }

    /// Sidecar location for a language: `<asset-base>.<code>.srt` next to
    /// the media file.
    pub fn sidecar_path(&self, language: &LanguageCode) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{}.{}.srt", stem, language);

        match self.path.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Audio artifact location: `<asset-base>.<codec>` next to the media file.
    pub fn audio_path(&self, codec: &str) -> PathBuf {
        self.path.with_extension(codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_naming_convention() {
        let asset = Asset::new(
            PathBuf::from("/media/shows/episode1.mkv"),
            SubtitleInventory::new(),
        );

        assert_eq!(
            asset.sidecar_path(&"ar".into()),
            PathBuf::from("/media/shows/episode1.ar.srt")
        );
    }

    #[test]
    fn test_audio_artifact_path() {
        let asset = Asset::new(PathBuf::from("/media/movie.mp4"), SubtitleInventory::new());
        assert_eq!(asset.audio_path("mp3"), PathBuf::from("/media/movie.mp3"));
    }

    #[test]
    fn test_inventory_membership() {
        let mut inventory = SubtitleInventory::new();
        inventory.insert("en".into(), PathBuf::from("a.en.srt"));

        assert!(inventory.contains(&"en".into()));
        assert!(!inventory.contains(&"nl".into()));
        assert_eq!(inventory.len(), 1);
    }
}
