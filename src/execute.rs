//! Completion executor.
//!
//! Applies a resolved action plan against one asset. Actions run in plan
//! order because later translations may depend on the transcription emitted
//! earlier in the same plan. Every collaborator failure is caught at action
//! granularity and folded into the report; nothing here aborts the run.
//!
//! Side effects are strictly additive: sidecars are written with
//! create-new-only semantics, so a file that already exists is never touched,
//! including one that appeared between resolution and execution.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::asset::Asset;
use crate::capability::CapabilityGraph;
use crate::error::{Result, SubfillError};
use crate::language::LanguageCode;
use crate::media::AudioExtractor;
use crate::resolve::{Action, ActionPlan, FailureReason};
use crate::transcribe::Transcriber;

/// Outcome of executing one asset's plan
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    asset: PathBuf,
    completed: Vec<LanguageCode>,
    failed: Vec<(LanguageCode, FailureReason)>,
    unresolved: Vec<(LanguageCode, FailureReason)>,
}

impl ExecutionReport {
    fn new(asset: PathBuf) -> Self {
        Self {
            asset,
            completed: Vec::new(),
            failed: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    pub fn asset(&self) -> &Path {
        &self.asset
    }

    pub fn completed(&self) -> &[LanguageCode] {
        &self.completed
    }

    pub fn failed(&self) -> &[(LanguageCode, FailureReason)] {
        &self.failed
    }

    pub fn unresolved(&self) -> &[(LanguageCode, FailureReason)] {
        &self.unresolved
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.unresolved.is_empty()
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} completed, {} failed, {} unresolved",
            self.asset.display(),
            self.completed.len(),
            self.failed.len(),
            self.unresolved.len()
        )?;

        for (language, reason) in self.failed.iter().chain(self.unresolved.iter()) {
            write!(f, "\n  {} - {}", language, reason)?;
        }

        Ok(())
    }
}

pub struct CompletionExecutor {
    transcriber: Arc<dyn Transcriber>,
    extractor: Arc<dyn AudioExtractor>,
    graph: Arc<CapabilityGraph>,
}

impl CompletionExecutor {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        extractor: Arc<dyn AudioExtractor>,
        graph: Arc<CapabilityGraph>,
    ) -> Self {
        Self {
            transcriber,
            extractor,
            graph,
        }
    }

    /// Apply a plan to one asset, sequentially, isolating each action's
    /// failure from its independent siblings.
    pub async fn execute(&self, asset: &Asset, plan: ActionPlan) -> ExecutionReport {
        let mut report = ExecutionReport::new(asset.path().to_path_buf());

        // Content produced during this plan, visible to later actions as a
        // translation source before it is re-read from disk.
        let mut produced: BTreeMap<LanguageCode, String> = BTreeMap::new();

        for action in plan {
            match action {
                Action::Transcribe { target } => {
                    match self.run_transcribe(asset, &target).await {
                        Ok(text) => {
                            produced.insert(target.clone(), text);
                            report.completed.push(target);
                        }
                        Err((reason, error)) => {
                            warn!(
                                "Transcription for {} of {} failed: {}",
                                target,
                                asset.path().display(),
                                error
                            );
                            report.failed.push((target, reason));
                        }
                    }
                }
                Action::Translate { source, target } => {
                    // A source neither produced this run nor present on disk
                    // means its producing action failed earlier in the plan.
                    if !produced.contains_key(&source) && !source_on_disk(asset, &source) {
                        report.failed.push((target, FailureReason::UpstreamFailed));
                        continue;
                    }

                    match self.run_translate(asset, &source, &target, &produced).await {
                        Ok(text) => {
                            produced.insert(target.clone(), text);
                            report.completed.push(target);
                        }
                        Err((reason, error)) => {
                            warn!(
                                "Translation {} -> {} for {} failed: {}",
                                source,
                                target,
                                asset.path().display(),
                                error
                            );
                            report.failed.push((target, reason));
                        }
                    }
                }
                Action::Unresolved { target, reason } => {
                    report.unresolved.push((target, reason));
                }
            }
        }

        report
    }

    /// Extract audio and transcribe it into the target language's sidecar.
    /// Returns the subtitle text so later plan actions can translate from it.
    async fn run_transcribe(
        &self,
        asset: &Asset,
        target: &LanguageCode,
    ) -> std::result::Result<String, (FailureReason, SubfillError)> {
        let sidecar = asset.sidecar_path(target);
        if sidecar.exists() {
            // Satisfied since resolution; reuse as a source, never rewrite.
            return read_text(&sidecar).map_err(|e| (FailureReason::UpstreamFailed, e));
        }

        let audio_path = self
            .extractor
            .extract(asset)
            .await
            .map_err(|e| (FailureReason::ExtractionFailed, e))?;

        let text = self
            .transcriber
            .transcribe(&audio_path, Some(target.clone()))
            .await
            .map_err(|e| (FailureReason::TranscriptionFailed, e))?;

        write_once(&sidecar, &text)
            .await
            .map_err(|e| (FailureReason::TranscriptionFailed, e))?;

        info!("Wrote transcription sidecar {}", sidecar.display());
        Ok(text)
    }

    async fn run_translate(
        &self,
        asset: &Asset,
        source: &LanguageCode,
        target: &LanguageCode,
        produced: &BTreeMap<LanguageCode, String>,
    ) -> std::result::Result<String, (FailureReason, SubfillError)> {
        let sidecar = asset.sidecar_path(target);
        if sidecar.exists() {
            return read_text(&sidecar).map_err(|e| (FailureReason::UpstreamFailed, e));
        }

        let source_text = match produced.get(source) {
            Some(text) => text.clone(),
            None => {
                let path = asset
                    .inventory()
                    .path(source)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| asset.sidecar_path(source));
                read_text(&path).map_err(|e| (FailureReason::UpstreamFailed, e))?
            }
        };

        let engine = self
            .graph
            .engine(source, target)
            .ok_or_else(|| {
                (
                    FailureReason::NoTranslationPath,
                    SubfillError::Translation(format!(
                        "No capability edge {} -> {}",
                        source, target
                    )),
                )
            })?;

        let text = engine
            .translate(&source_text)
            .await
            .map_err(|e| (FailureReason::TranslationFailed, e))?;

        write_once(&sidecar, &text)
            .await
            .map_err(|e| (FailureReason::TranslationFailed, e))?;

        info!("Wrote translation sidecar {}", sidecar.display());
        Ok(text)
    }
}

fn source_on_disk(asset: &Asset, source: &LanguageCode) -> bool {
    asset.inventory().contains(source) || asset.sidecar_path(source).exists()
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(SubfillError::Io)
}

/// Write subtitle content only if the file does not exist yet. An existing
/// file is left untouched and reported as a no-op.
async fn write_once(path: &Path, content: &str) -> Result<()> {
    let open = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await;

    match open {
        Ok(mut file) => {
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(SubfillError::Io(e)),
    }
}
