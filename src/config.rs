//! Runtime configuration utilities for feedback-insights.

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

use crate::analysis::AnalysisOptions;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for input artefacts and local models.
    pub data_dir: PathBuf,
    /// Root folder for analytic outputs.
    pub outputs_dir: PathBuf,
    /// Minimum number of valid documents before a course is clustered.
    pub min_feedback_count: usize,
    /// Courses processed at once during summarization and topic discovery.
    pub course_concurrency: usize,
    /// In-flight sentiment classifications per batch.
    pub sentiment_concurrency: usize,
    /// Remote text generation settings; `None` disables remote generation.
    pub llm: Option<LlmSettings>,
}

/// OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        let llm = env::var("LLM_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|endpoint| LlmSettings {
                endpoint,
                api_key: env::var("LLM_API_KEY").ok().filter(|v| !v.is_empty()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                timeout_secs: parse_var("LLM_TIMEOUT_SECS", 30),
                max_retries: parse_var("LLM_MAX_RETRIES", 2),
            });

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            data_dir,
            outputs_dir,
            min_feedback_count: parse_var("MIN_FEEDBACK_COUNT", 5),
            course_concurrency: parse_var::<usize>("COURSE_CONCURRENCY", 4).max(1),
            sentiment_concurrency: parse_var::<usize>("SENTIMENT_CONCURRENCY", 8).max(1),
            llm,
        })
    }

    /// Pipeline knobs derived from the loaded configuration.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            min_feedback_count: self.min_feedback_count,
            course_concurrency: self.course_concurrency,
            sentiment_concurrency: self.sentiment_concurrency,
        }
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
