//! Subfill - Subtitle Coverage Completion
//!
//! Command-line entry point: scans a media library and guarantees subtitle
//! sidecars in the configured target languages, transcribing audio or
//! translating existing subtitles as needed.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subfill::cli::{Args, Commands};
use subfill::config::Config;
use subfill::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Run { library } => {
            let workflow = Workflow::new(config)?;
            let summary = workflow.run_library(library.as_deref()).await?;

            println!("{}", summary);
            for report in summary.reports.iter().filter(|r| !r.is_complete()) {
                println!("{}", report);
            }
        }
        Commands::Plan { library } => {
            let workflow = Workflow::new(config)?;
            let plans = workflow.plan_library(library.as_deref())?;

            let mut pending = 0;
            for (asset, plan) in &plans {
                if plan.is_empty() {
                    continue;
                }
                pending += 1;
                println!("{}", asset.path().display());
                for action in plan {
                    println!("  {}", action);
                }
            }
            println!(
                "{} of {} asset(s) need work",
                pending,
                plans.len()
            );
        }
        Commands::Process { input } => {
            info!("Processing video file: {}", input.display());
            let workflow = Workflow::new(config)?;
            let report = workflow.process_file(&input).await?;
            println!("{}", report);
        }
        Commands::InitConfig { output } => {
            config.save_to_file(&output)?;
            println!("Wrote configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".subfill").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "subfill.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
