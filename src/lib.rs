//! Course feedback analytics: text normalization, sentiment tagging, per-course
//! summaries, topic discovery and time-bucketed aggregation.

pub mod analysis;
pub mod backend;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;

pub use analysis::{AnalysisContext, AnalysisOptions, AnalysisRequest, AnalysisResult};
pub use backend::InferenceBackend;
pub use data::records::{FeedbackBatch, FeedbackRecord};
pub use nlp::normalize::clean_text;
pub use nlp::sentiment::SentimentLabel;
pub use nlp::topics::{Topic, TopicDiscoveryResult};
