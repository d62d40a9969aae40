use std::path::PathBuf;
use std::process::Command;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::asset::Asset;
use crate::config::MediaConfig;
use crate::error::{Result, SubfillError};
use super::commands::MediaCommandBuilder;
use super::AudioExtractor;

/// FFmpeg-based audio extractor
pub struct FfmpegExtractor {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl FfmpegExtractor {
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl AudioExtractor for FfmpegExtractor {
    async fn extract(&self, asset: &Asset) -> Result<PathBuf> {
        let audio_path = asset.audio_path(&self.config.audio_codec);

        if audio_path.exists() {
            debug!("Reusing existing audio artifact: {}", audio_path.display());
            return Ok(audio_path);
        }

        info!(
            "Extracting audio from {} to {}",
            asset.path().display(),
            audio_path.display()
        );

        let command = self.command_builder.extract_audio(
            asset.path(),
            audio_path.as_path(),
            &self.config.audio_codec,
        );
        command.execute().await?;

        info!("Audio extraction completed");
        Ok(audio_path)
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("-version")
            .output()
            .map_err(|e| SubfillError::Extraction(format!("Media processor not found: {}", e)))?;

        if output.status.success() {
            debug!("Media processor is available");
            Ok(())
        } else {
            Err(SubfillError::Extraction(
                "Media processor version check failed".to_string(),
            ))
        }
    }
}
