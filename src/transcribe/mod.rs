// Transcription client abstraction
//
// The remote transcription service is the expensive, contended resource in
// the whole pipeline; implementations bound their own concurrent request
// count so asset workers queue here instead of overwhelming the service.

pub mod http;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::config::TranscriberConfig;
use crate::error::Result;
use crate::language::LanguageCode;

/// Main trait for transcription operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file to plain subtitle text. The optional language
    /// is a hint for the service, not a guarantee about the output.
    async fn transcribe(&self, audio_path: &Path, language: Option<LanguageCode>)
        -> Result<String>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create(config: TranscriberConfig) -> Result<Arc<dyn Transcriber>> {
        Ok(Arc::new(http::HttpTranscriber::new(config)?))
    }
}
