use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SubfillError};
use crate::language::LanguageCode;

fn default_concurrency() -> usize {
    4
}

fn default_max_concurrent_requests() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub library: LibraryConfig,
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Root directory scanned for video assets
    pub root: PathBuf,
    /// Languages every asset must end up with, in priority order.
    /// The first entry is the pivot: it receives the transcription when an
    /// asset has no subtitles at all, and it wins tie-breaks as a
    /// translation source.
    pub required_languages: Vec<LanguageCode>,
    /// File extensions treated as video assets
    pub video_extensions: Vec<String>,
    /// Number of assets processed in parallel
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Transcription service endpoint URL
    pub endpoint: String,
    /// Request timeout in seconds (transcription of long audio can take minutes)
    pub timeout_secs: u64,
    /// Upper bound on concurrent transcription requests; the remote service
    /// is the contended resource, not the local worker pool
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    /// Whether to pass the pivot language as a hint to the service
    #[serde(default)]
    pub hint_target_language: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation service endpoint URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Available translation capabilities as "from-to" pairs, e.g. "en-ar".
    /// Each pair becomes one directed edge in the capability graph.
    pub pairs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Codec for the extracted audio artifact
    pub audio_codec: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: LibraryConfig {
                root: PathBuf::from("."),
                required_languages: vec![
                    LanguageCode::from("en"),
                    LanguageCode::from("ar"),
                    LanguageCode::from("nl"),
                ],
                video_extensions: vec![
                    "mp4", "mkv", "avi", "m2ts", "mov", "wmv", "flv", "mpg", "mpeg", "vob",
                    "rm", "rmvb", "3gp", "divx", "xvid", "webm",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                concurrency: default_concurrency(),
            },
            transcriber: TranscriberConfig {
                endpoint: "http://localhost:8001".to_string(),
                timeout_secs: 1800,
                max_concurrent_requests: default_max_concurrent_requests(),
                hint_target_language: true,
            },
            translate: TranslateConfig {
                endpoint: "http://localhost:5000".to_string(),
                timeout_secs: 300,
                pairs: vec![
                    "en-ar".to_string(),
                    "en-nl".to_string(),
                    "ar-en".to_string(),
                    "nl-en".to_string(),
                ],
            },
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
                audio_codec: "mp3".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubfillError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SubfillError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubfillError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SubfillError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

impl TranslateConfig {
    /// Parse the configured "from-to" pairs into typed directed edges.
    pub fn parsed_pairs(&self) -> Result<Vec<(LanguageCode, LanguageCode)>> {
        let mut edges = Vec::with_capacity(self.pairs.len());

        for pair in &self.pairs {
            let (from, to) = pair.split_once('-').ok_or_else(|| {
                SubfillError::Config(format!(
                    "Invalid translation pair '{}': expected 'from-to'",
                    pair
                ))
            })?;

            if from.is_empty() || to.is_empty() {
                return Err(SubfillError::Config(format!(
                    "Invalid translation pair '{}': empty language code",
                    pair
                )));
            }

            if from == to {
                return Err(SubfillError::Config(format!(
                    "Invalid translation pair '{}': source equals target",
                    pair
                )));
            }

            edges.push((LanguageCode::from(from), LanguageCode::from(to)));
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trip() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.library.required_languages, config.library.required_languages);
        assert_eq!(parsed.translate.pairs, config.translate.pairs);
    }

    #[test]
    fn test_parsed_pairs() {
        let config = Config::default();
        let edges = config.translate.parsed_pairs().unwrap();
        assert!(edges.contains(&(LanguageCode::from("en"), LanguageCode::from("ar"))));
    }

    #[test]
    fn test_parsed_pairs_rejects_malformed() {
        let mut translate = Config::default().translate;
        translate.pairs = vec!["enar".to_string()];
        assert!(translate.parsed_pairs().is_err());

        translate.pairs = vec!["en-".to_string()];
        assert!(translate.parsed_pairs().is_err());

        translate.pairs = vec!["en-en".to_string()];
        assert!(translate.parsed_pairs().is_err());
    }
}
