// LibreTranslate-compatible HTTP translation engine

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SubfillError};
use crate::language::LanguageCode;
use super::TranslationEngine;

#[derive(Debug, Clone, Serialize)]
struct TranslationRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Engine for one (source, target) pair, backed by a LibreTranslate-style
/// `/translate` endpoint.
pub struct HttpTranslationEngine {
    client: Client,
    endpoint: String,
    from: LanguageCode,
    to: LanguageCode,
}

impl HttpTranslationEngine {
    pub fn new(client: Client, endpoint: String, from: LanguageCode, to: LanguageCode) -> Self {
        Self {
            client,
            endpoint,
            from,
            to,
        }
    }
}

#[async_trait]
impl TranslationEngine for HttpTranslationEngine {
    async fn translate(&self, text: &str) -> Result<String> {
        let url = format!("{}/translate", self.endpoint);

        debug!(
            "Sending translation request {} -> {} to {}",
            self.from, self.to, url
        );

        let request = TranslationRequest {
            q: text,
            source: self.from.as_str(),
            target: self.to.as_str(),
            format: "text",
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubfillError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SubfillError::Translation(format!(
                "Translation service error {}: {}",
                status, error_text
            )));
        }

        let translation: TranslationResponse = response
            .json()
            .await
            .map_err(|e| SubfillError::Translation(format!("Failed to parse response: {}", e)))?;

        Ok(translation.translated_text)
    }
}
