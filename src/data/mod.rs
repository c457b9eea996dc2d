//! Feedback ingestion, validation and tabular export.

pub mod export;
pub mod records;
