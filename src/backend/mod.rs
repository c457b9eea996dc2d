//! Inference backends: sentiment classification, text generation and document
//! embeddings behind one trait so the pipeline can run against real models or
//! deterministic stand-ins.

pub mod remote;
#[cfg(feature = "summaries")]
pub mod llama;
#[cfg(feature = "onx")]
pub mod onnx;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::{
    config::Settings,
    error::BackendError,
    nlp::{embeddings::Embedder, sentiment},
};

use remote::RemoteGenerator;

/// Model capabilities consumed by the analysis pipeline.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Classify a normalized text, returning the model's raw label identifier.
    async fn classify_sentiment(&self, text: &str) -> Result<String, BackendError>;

    /// Generate free text for a prompt.
    async fn generate_text(&self, prompt: &str) -> Result<String, BackendError>;

    /// Embed documents into fixed-width vectors, one per input, in order.
    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f32>>, BackendError>;
}

/// How sentiment is scored. The lexicon needs no model files and is the
/// fallback whenever a transformer model is unavailable.
pub enum SentimentModel {
    Lexicon,
    #[cfg(feature = "onx")]
    Onnx(onnx::OnnxSentiment),
}

impl SentimentModel {
    fn describe(&self) -> &'static str {
        match self {
            Self::Lexicon => "lexicon",
            #[cfg(feature = "onx")]
            Self::Onnx(_) => "onnx",
        }
    }
}

/// Where generated text comes from.
pub enum Generator {
    Disabled,
    Remote(RemoteGenerator),
    #[cfg(feature = "summaries")]
    Llama(llama::LlamaGenerator),
}

impl Generator {
    fn describe(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Remote(_) => "remote",
            #[cfg(feature = "summaries")]
            Self::Llama(_) => "llama",
        }
    }
}

/// Production backend: configured sentiment model, embedder and generator.
pub struct StandardBackend {
    sentiment: SentimentModel,
    embedder: Embedder,
    generator: Generator,
}

impl StandardBackend {
    /// Backend scoring sentiment with the lexicon.
    pub fn new(embedder: Embedder, generator: Generator) -> Self {
        Self {
            sentiment: SentimentModel::Lexicon,
            embedder,
            generator,
        }
    }

    pub fn with_sentiment(mut self, sentiment: SentimentModel) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Fully local backend with no text generation.
    pub fn offline() -> Self {
        Self::new(Embedder::hashed(), Generator::Disabled)
    }
}

#[async_trait]
impl InferenceBackend for StandardBackend {
    async fn classify_sentiment(&self, text: &str) -> Result<String, BackendError> {
        match &self.sentiment {
            SentimentModel::Lexicon => Ok(sentiment::lexicon_label(text).to_string()),
            #[cfg(feature = "onx")]
            SentimentModel::Onnx(model) => model.classify(text).await,
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, BackendError> {
        match &self.generator {
            Generator::Disabled => Err(BackendError::Unavailable),
            Generator::Remote(client) => client.complete(prompt).await,
            #[cfg(feature = "summaries")]
            Generator::Llama(model) => model.complete(prompt).await,
        }
    }

    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        self.embedder.embed(documents)
    }
}

/// Run CPU-bound model work on tokio's blocking pool.
pub async fn run_blocking<T, F>(task: F) -> Result<T, BackendError>
where
    F: FnOnce() -> Result<T, BackendError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| BackendError::other(format!("blocking task failed: {e}")))?
}

/// Load the process-wide backend. Failures here are fatal for the process.
pub async fn load(settings: &Settings) -> Result<Arc<dyn InferenceBackend>> {
    let sentiment = sentiment_model(settings)?;
    let embedder = Embedder::load()?;

    let generator = match &settings.llm {
        Some(llm) => Generator::Remote(RemoteGenerator::new(llm)?),
        None => local_generator(settings)?,
    };

    info!(
        sentiment = sentiment.describe(),
        embedder = embedder.describe(),
        generator = generator.describe(),
        "loaded inference backend"
    );
    let backend = StandardBackend::new(embedder, generator).with_sentiment(sentiment);
    Ok(Arc::new(backend) as Arc<dyn InferenceBackend>)
}

#[cfg(feature = "onx")]
fn sentiment_model(settings: &Settings) -> Result<SentimentModel> {
    let model_dir = settings.join_data("models/sentiment");
    if !model_dir.join("model.onnx").exists() {
        tracing::warn!(path = %model_dir.display(), "sentiment model missing; using lexicon");
        return Ok(SentimentModel::Lexicon);
    }
    Ok(SentimentModel::Onnx(onnx::OnnxSentiment::load(&model_dir)?))
}

#[cfg(not(feature = "onx"))]
fn sentiment_model(_settings: &Settings) -> Result<SentimentModel> {
    Ok(SentimentModel::Lexicon)
}

#[cfg(feature = "summaries")]
fn local_generator(settings: &Settings) -> Result<Generator> {
    let model_path = settings.join_data("models/llama-tiny.gguf");
    if !model_path.exists() {
        tracing::warn!(path = %model_path.display(), "local model missing; generation disabled");
        return Ok(Generator::Disabled);
    }
    Ok(Generator::Llama(llama::LlamaGenerator::load(&model_path)?))
}

#[cfg(not(feature = "summaries"))]
fn local_generator(_settings: &Settings) -> Result<Generator> {
    Ok(Generator::Disabled)
}
