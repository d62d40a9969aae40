// Translation engine abstraction
//
// One engine instance backs one directed (source, target) capability edge.
// Engines are stateless after construction and safe to invoke concurrently
// from different asset workers.

pub mod http;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::TranslateConfig;
use crate::error::Result;
use crate::language::LanguageCode;

/// Main trait for translation operations
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate subtitle text from this engine's source language to its
    /// target language. The text is opaque; no subtitle structure is assumed.
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Factory for creating translation engine instances
///
/// All engines share one HTTP client; only the language pair differs.
pub struct TranslationEngineFactory {
    client: Client,
    config: TranslateConfig,
}

impl TranslationEngineFactory {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create the engine backing one capability edge
    pub fn create_engine(
        &self,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Arc<dyn TranslationEngine> {
        Arc::new(http::HttpTranslationEngine::new(
            self.client.clone(),
            self.config.endpoint.clone(),
            from,
            to,
        ))
    }
}
