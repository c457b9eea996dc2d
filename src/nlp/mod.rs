//! Natural language processing stages: normalization, sentiment, summaries
//! and topic discovery.

pub mod cluster;
pub mod embeddings;
pub mod keywords;
pub mod lexicon;
pub mod naming;
pub mod normalize;
pub mod sentiment;
pub mod summarize;
pub mod topics;
