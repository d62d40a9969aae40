// Media processing abstraction
//
// Audio extraction is a thin wrapper over an external codec binary. The only
// contract the rest of the pipeline relies on is idempotence: extraction is a
// no-op when the audio artifact already exists for the asset.

pub mod commands;
pub mod extractor;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::asset::Asset;
use crate::config::MediaConfig;
use crate::error::Result;

/// Main trait for audio extraction
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Produce the audio artifact for an asset, skipping work when it
    /// already exists. Returns the artifact path.
    async fn extract(&self, asset: &Asset) -> Result<PathBuf>;

    /// Check that the codec binary is available
    fn check_availability(&self) -> Result<()>;
}

/// Factory for creating audio extractor instances
pub struct AudioExtractorFactory;

impl AudioExtractorFactory {
    pub fn create(config: MediaConfig) -> Arc<dyn AudioExtractor> {
        Arc::new(extractor::FfmpegExtractor::new(config))
    }
}
