//! CLI entry-point for per-course topic discovery.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use feedback_insights::{
    analysis::{self, AnalysisContext},
    config::Settings,
};

/// Args for the `topics` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Feedback CSV or JSON request; only course and feedback_text are required
    /// (defaults to DATA_DIR/feedback.csv).
    #[arg(long)]
    pub input: Option<PathBuf>,
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
    let loaded = super::load_topic_batch(&input)?;
    let ctx = AnalysisContext::from_settings(&settings).await?;

    let min = args
        .min_feedback_count
        .or(loaded.min_feedback_count)
        .unwrap_or(ctx.options.min_feedback_count);
    let results = analysis::discover_course_topics(&ctx, &loaded.batch, min).await;
    super::emit_json(&results, args.output.as_deref())
}
