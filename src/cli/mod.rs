//! Command-line interface wiring for feedback-insights.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feedback_insights::{
    config::Settings,
    data::records::{BatchFile, FeedbackBatch, TopicBatch, TopicBatchFile},
};

pub mod analyze;
pub mod clean;
pub mod timeseries;
pub mod topics;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Course feedback analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Timeseries(args) => timeseries::run(args, settings).await,
            Commands::Topics(args) => topics::run(args, settings).await,
            Commands::Clean(args) => clean::run(args),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summaries, ratings and sentiment per course.
    Analyze(analyze::Args),
    /// Export monthly sentiment and rating series as CSV.
    Timeseries(timeseries::Args),
    /// Discover discussion topics per course.
    Topics(topics::Args),
    /// Print the normalized form of a text.
    Clean(clean::Args),
}

/// Input path defaulting to `DATA_DIR/feedback.csv`.
pub fn resolve_input(input: Option<PathBuf>, settings: &Settings) -> PathBuf {
    input.unwrap_or_else(|| settings.join_data("feedback.csv"))
}

pub fn load_batch(path: &Path) -> Result<BatchFile> {
    FeedbackBatch::load(path).with_context(|| format!("loading feedback from {}", path.display()))
}

pub fn load_topic_batch(path: &Path) -> Result<TopicBatchFile> {
    TopicBatch::load(path).with_context(|| format!("loading topics request from {}", path.display()))
}

/// Print JSON to stdout or write it to `output`.
pub fn emit_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote analysis");
        }
        None => println!("{json}"),
    }
    Ok(())
}
