//! CLI entry-point for the full feedback analysis.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use feedback_insights::{
    analysis::{self, AnalysisContext, AnalysisRequest},
    config::Settings,
};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Feedback CSV or JSON file (defaults to DATA_DIR/feedback.csv).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Include monthly sentiment and rating series.
    #[arg(long)]
    pub timeseries: bool,
    /// Include topic discovery per course.
    #[arg(long)]
    pub topics: bool,
    /// Valid documents required before a course is clustered.
    #[arg(long)]
    pub min_feedback_count: Option<usize>,
    /// Write JSON here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = super::resolve_input(args.input, &settings);
    let loaded = super::load_batch(&input)?;
    let ctx = AnalysisContext::from_settings(&settings).await?;

    let request = AnalysisRequest {
        timeseries: args.timeseries,
        topics: args.topics,
        min_feedback_count: args.min_feedback_count.or(loaded.min_feedback_count),
    };
    let result = analysis::run_full_analysis(&ctx, &loaded.batch, &request).await;
    super::emit_json(&result, args.output.as_deref())
}
