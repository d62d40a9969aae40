use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the library and complete subtitle coverage for every asset
    Run {
        /// Library root (overrides the configured one)
        #[arg(short, long)]
        library: Option<PathBuf>,
    },

    /// Dry run: show the action plan per asset without executing anything
    Plan {
        /// Library root (overrides the configured one)
        #[arg(short, long)]
        library: Option<PathBuf>,
    },

    /// Complete subtitle coverage for a single video file
    Process {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
