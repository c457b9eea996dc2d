//! CLI entry-point exporting monthly series to CSV.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use feedback_insights::{
    analysis::{self, timeseries::rating_timeseries, AnalysisContext},
    config::Settings,
    data::export,
};

/// Args for the `timeseries` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Feedback CSV or JSON file (defaults to DATA_DIR/feedback.csv).
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = super::resolve_input(args.input, &settings);
    let loaded = super::load_batch(&input)?;
    let ctx = AnalysisContext::from_settings(&settings).await?;

    let sentiment = analysis::get_sentiment_timeseries(&ctx, &loaded.batch).await;
    let mut frame = export::sentiment_frame(&sentiment)?;
    export::write_csv(&mut frame, &settings.join_output("sentiment_monthly.csv"))?;

    let ratings = rating_timeseries(loaded.batch.records());
    let mut frame = export::rating_frame(&ratings)?;
    export::write_csv(&mut frame, &settings.join_output("rating_monthly.csv"))?;
    Ok(())
}
