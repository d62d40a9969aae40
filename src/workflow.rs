//! Run orchestration: scan, resolve, execute.
//!
//! Assets are independent of one another, so they run in parallel up to the
//! configured bound. Each asset's plan stays strictly sequential because its
//! translations may feed off the transcription emitted earlier in the plan.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::asset::Asset;
use crate::capability::CapabilityGraph;
use crate::config::Config;
use crate::error::{Result, SubfillError};
use crate::execute::{CompletionExecutor, ExecutionReport};
use crate::media::AudioExtractorFactory;
use crate::resolve::{resolve, ActionPlan};
use crate::scan::AssetScanner;
use crate::transcribe::TranscriberFactory;

/// Aggregated outcome of one library run
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<ExecutionReport>,
}

impl RunSummary {
    pub fn fully_covered(&self) -> usize {
        self.reports.iter().filter(|r| r.is_complete()).count()
    }

    pub fn with_gaps(&self) -> usize {
        self.reports.len() - self.fully_covered()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} asset(s) processed: {} fully covered, {} with remaining gaps",
            self.reports.len(),
            self.fully_covered(),
            self.with_gaps()
        )
    }
}

pub struct Workflow {
    config: Config,
    scanner: AssetScanner,
    executor: Arc<CompletionExecutor>,
    graph: Arc<CapabilityGraph>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let graph = Arc::new(CapabilityGraph::from_config(&config.translate)?);
        let transcriber = TranscriberFactory::create(config.transcriber.clone())?;
        let extractor = AudioExtractorFactory::create(config.media.clone());

        // Fail early when the codec binary is missing; every transcription
        // path would hit it anyway.
        extractor.check_availability()?;

        let executor = Arc::new(CompletionExecutor::new(transcriber, extractor, graph.clone()));
        let scanner = AssetScanner::new(config.library.video_extensions.clone());

        Ok(Self {
            config,
            scanner,
            executor,
            graph,
        })
    }

    /// Scan the library and bring every asset to full coverage
    pub async fn run_library(&self, root: Option<&Path>) -> Result<RunSummary> {
        let root = root.unwrap_or(&self.config.library.root);
        info!("Processing library: {}", root.display());

        let assets = self.scanner.scan_library(root)?;
        let progress = library_progress_bar(assets.len() as u64);

        let permits = Arc::new(Semaphore::new(self.config.library.concurrency.max(1)));
        let required = Arc::new(self.config.library.required_languages.clone());
        let mut tasks: JoinSet<ExecutionReport> = JoinSet::new();

        for asset in assets {
            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| SubfillError::Config(format!("Worker pool closed: {}", e)))?;
            let executor = self.executor.clone();
            let graph = self.graph.clone();
            let required = required.clone();
            let progress = progress.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let plan = resolve(asset.inventory(), &required, &graph);
                let report = executor.execute(&asset, plan).await;
                progress.inc(1);
                report
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => {
                    if !report.is_complete() {
                        warn!("{}", report);
                    }
                    reports.push(report);
                }
                Err(e) => warn!("Asset worker failed: {}", e),
            }
        }

        progress.finish_and_clear();

        let summary = RunSummary { reports };
        info!("{}", summary);
        Ok(summary)
    }

    /// Resolve and execute a single asset file
    pub async fn process_file(&self, path: &Path) -> Result<ExecutionReport> {
        let asset = self.scanner.scan_asset(path)?;
        let plan = resolve(
            asset.inventory(),
            &self.config.library.required_languages,
            &self.graph,
        );

        info!(
            "Resolved {} action(s) for {}",
            plan.len(),
            asset.path().display()
        );

        Ok(self.executor.execute(&asset, plan).await)
    }

    /// Dry run: scan and resolve every asset without touching the filesystem
    pub fn plan_library(&self, root: Option<&Path>) -> Result<Vec<(Asset, ActionPlan)>> {
        let root = root.unwrap_or(&self.config.library.root);
        let assets = self.scanner.scan_library(root)?;

        Ok(assets
            .into_iter()
            .map(|asset| {
                let plan = resolve(
                    asset.inventory(),
                    &self.config.library.required_languages,
                    &self.graph,
                );
                (asset, plan)
            })
            .collect())
    }
}

fn library_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} assets {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress
}
