// HTTP client for the whisper transcription service

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::config::TranscriberConfig;
use crate::error::{Result, SubfillError};
use crate::language::LanguageCode;
use super::Transcriber;

#[derive(Debug, Clone, Deserialize)]
struct TranscriptionResponse {
    transcription: String,
}

/// Transcriber backed by a whisper HTTP service: the audio file goes up as a
/// multipart form, plain text comes back in a JSON body.
pub struct HttpTranscriber {
    client: Client,
    endpoint: String,
    /// Caps in-flight requests against the remote service
    permits: Semaphore,
    hint_target_language: bool,
}

impl HttpTranscriber {
    pub fn new(config: TranscriberConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            permits: Semaphore::new(config.max_concurrent_requests.max(1)),
            hint_target_language: config.hint_target_language,
        })
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<LanguageCode>,
    ) -> Result<String> {
        let _permit = self.permits.acquire().await.map_err(|e| {
            SubfillError::Transcription(format!("Transcription semaphore closed: {}", e))
        })?;

        let url = format!("{}/transcribe", self.endpoint);
        info!("Transcribing {} via {}", audio_path.display(), url);

        let audio = tokio::fs::read(audio_path).await.map_err(|e| {
            SubfillError::Transcription(format!(
                "Failed to read audio file {}: {}",
                audio_path.display(),
                e
            ))
        })?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| SubfillError::Transcription(format!("Invalid multipart body: {}", e)))?;

        let mut form = Form::new().part("file", part);
        if self.hint_target_language {
            if let Some(language) = &language {
                form = form.text("language", language.to_string());
            }
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubfillError::Transcription(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SubfillError::Transcription(format!(
                "Transcription service error {}: {}",
                status, error_text
            )));
        }

        // A well-formed 2xx body without the transcription field is still a
        // failed transcription.
        let body: TranscriptionResponse = response.json().await.map_err(|e| {
            SubfillError::Transcription(format!("Malformed response body: {}", e))
        })?;

        debug!(
            "Transcription of {} returned {} bytes",
            audio_path.display(),
            body.transcription.len()
        );

        Ok(body.transcription)
    }
}
