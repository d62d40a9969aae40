//! End-to-end coverage completion over a temporary media library.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use async_trait::async_trait;

use subfill::asset::Asset;
use subfill::capability::CapabilityGraph;
use subfill::error::{Result, SubfillError};
use subfill::execute::CompletionExecutor;
use subfill::language::LanguageCode;
use subfill::media::AudioExtractor;
use subfill::resolve::resolve;
use subfill::scan::AssetScanner;
use subfill::transcribe::Transcriber;
use subfill::translate::TranslationEngine;

struct FakeTranscriber {
    text: &'static str,
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _language: Option<LanguageCode>,
    ) -> Result<String> {
        Ok(self.text.to_string())
    }
}

struct FakeExtractor;

#[async_trait]
impl AudioExtractor for FakeExtractor {
    async fn extract(&self, asset: &Asset) -> Result<PathBuf> {
        let audio = asset.audio_path("mp3");
        if !audio.exists() {
            std::fs::write(&audio, b"audio")?;
        }
        Ok(audio)
    }

    fn check_availability(&self) -> Result<()> {
        Ok(())
    }
}

struct PrefixEngine {
    prefix: String,
}

#[async_trait]
impl TranslationEngine for PrefixEngine {
    async fn translate(&self, text: &str) -> Result<String> {
        Ok(format!("[{}] {}", self.prefix, text))
    }
}

struct BrokenEngine;

#[async_trait]
impl TranslationEngine for BrokenEngine {
    async fn translate(&self, _text: &str) -> Result<String> {
        Err(SubfillError::Translation("engine unavailable".to_string()))
    }
}

fn graph(edges: &[(&str, &str)]) -> Arc<CapabilityGraph> {
    let mut graph = CapabilityGraph::new();
    for (from, to) in edges {
        let engine = PrefixEngine {
            prefix: format!("{}>{}", from, to),
        };
        graph
            .add_edge((*from).into(), (*to).into(), Arc::new(engine))
            .unwrap();
    }
    Arc::new(graph)
}

fn executor(graph: Arc<CapabilityGraph>) -> CompletionExecutor {
    CompletionExecutor::new(
        Arc::new(FakeTranscriber { text: "transcript" }),
        Arc::new(FakeExtractor),
        graph,
    )
}

fn required(codes: &[&str]) -> Vec<LanguageCode> {
    codes.iter().map(|c| (*c).into()).collect()
}

#[tokio::test]
async fn library_reaches_full_coverage_and_stays_idempotent() {
    let temp = TempDir::new().unwrap();
    temp.child("fresh.mkv").write_str("video").unwrap();
    temp.child("partial.mp4").write_str("video").unwrap();
    temp.child("partial.ar.srt").write_str("arabic subs").unwrap();
    temp.child("done.mkv").write_str("video").unwrap();
    for lang in ["en", "ar", "nl"] {
        temp.child(format!("done.{}.srt", lang))
            .write_str("already here")
            .unwrap();
    }

    let graph = graph(&[("en", "ar"), ("en", "nl"), ("ar", "en"), ("ar", "nl")]);
    let executor = executor(graph.clone());
    let scanner = AssetScanner::new(vec!["mkv".to_string(), "mp4".to_string()]);
    let req = required(&["en", "ar", "nl"]);

    let assets = scanner.scan_library(temp.path()).unwrap();
    assert_eq!(assets.len(), 3);

    for asset in &assets {
        let plan = resolve(asset.inventory(), &req, &graph);
        let report = executor.execute(asset, plan).await;
        assert!(report.is_complete(), "incomplete report: {}", report);
    }

    // Fresh asset: pivot transcription plus fan-out translations.
    temp.child("fresh.en.srt").assert("transcript");
    temp.child("fresh.ar.srt").assert("[en>ar] transcript");
    temp.child("fresh.nl.srt").assert("[en>nl] transcript");

    // Partial asset: existing Arabic subtitles were the source; no audio was
    // ever extracted for it.
    temp.child("partial.en.srt").assert("[ar>en] arabic subs");
    temp.child("partial.nl.srt").assert("[ar>nl] arabic subs");
    assert!(!temp.path().join("partial.mp3").exists());

    // Fully covered asset: untouched.
    temp.child("done.en.srt").assert("already here");

    // Second resolution over on-disk truth finds nothing left to do.
    for asset in scanner.scan_library(temp.path()).unwrap() {
        let plan = resolve(asset.inventory(), &req, &graph);
        assert!(plan.is_empty(), "leftover plan for {}", asset.path().display());
    }
}

#[tokio::test]
async fn one_failing_language_leaves_the_rest_intact() {
    let temp = TempDir::new().unwrap();
    temp.child("movie.mkv").write_str("video").unwrap();

    let mut capability = CapabilityGraph::new();
    capability
        .add_edge(
            "en".into(),
            "ar".into(),
            Arc::new(PrefixEngine {
                prefix: "en>ar".to_string(),
            }),
        )
        .unwrap();
    capability
        .add_edge("en".into(), "nl".into(), Arc::new(BrokenEngine))
        .unwrap();
    let capability = Arc::new(capability);

    let executor = executor(capability.clone());
    let scanner = AssetScanner::new(vec!["mkv".to_string()]);
    let req = required(&["en", "ar", "nl"]);

    let asset = scanner.scan_asset(&temp.path().join("movie.mkv")).unwrap();
    let plan = resolve(asset.inventory(), &req, &capability);
    let report = executor.execute(&asset, plan).await;

    assert_eq!(report.completed().len(), 2);
    assert_eq!(report.failed().len(), 1);
    temp.child("movie.en.srt").assert("transcript");
    temp.child("movie.ar.srt").assert("[en>ar] transcript");
    assert!(!temp.path().join("movie.nl.srt").exists());

    // A later run retries only the failed language.
    let rescanned = scanner.scan_asset(&temp.path().join("movie.mkv")).unwrap();
    let retry_plan = resolve(rescanned.inventory(), &req, &capability);
    assert_eq!(retry_plan.len(), 1);
    assert_eq!(retry_plan[0].target(), &LanguageCode::from("nl"));
}
