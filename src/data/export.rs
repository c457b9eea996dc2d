//! CSV export of monthly series through polars data frames.

use std::{fs::File, path::Path};

use anyhow::Result;
use polars::prelude::{CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use tracing::info;

use crate::analysis::timeseries::{RatingBucket, SentimentBucket};

/// Build a frame with columns `course, month, Negative, Neutral, Positive`.
pub fn sentiment_frame(buckets: &[SentimentBucket]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "course".into(),
            buckets.iter().map(|b| b.course.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "month".into(),
            buckets.iter().map(|b| b.month.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "Negative".into(),
            buckets.iter().map(|b| b.counts.negative as u64).collect::<Vec<_>>(),
        ),
        Series::new(
            "Neutral".into(),
            buckets.iter().map(|b| b.counts.neutral as u64).collect::<Vec<_>>(),
        ),
        Series::new(
            "Positive".into(),
            buckets.iter().map(|b| b.counts.positive as u64).collect::<Vec<_>>(),
        ),
    ])?;
    Ok(df)
}

/// Build a frame with columns `course, month, average_rating`.
pub fn rating_frame(buckets: &[RatingBucket]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "course".into(),
            buckets.iter().map(|b| b.course.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "month".into(),
            buckets.iter().map(|b| b.month.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "average_rating".into(),
            buckets.iter().map(|b| b.average_rating).collect::<Vec<_>>(),
        ),
    ])?;
    Ok(df)
}

/// Write a frame as CSV, creating parent directories as needed.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}
