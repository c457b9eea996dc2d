//! Document embeddings for topic discovery.
//!
//! The default embedder is a deterministic hashed bag-of-words projection; the
//! `embeddings` feature swaps in MiniLM through fastembed.

#[cfg(feature = "embeddings")]
use std::sync::Mutex;

use anyhow::Result;

#[cfg(feature = "embeddings")]
use fastembed::TextEmbedding;

use crate::error::BackendError;

/// Width of hashed bag-of-words vectors.
pub const HASHED_DIMENSIONS: usize = 256;

pub enum Embedder {
    Hashed(HashedEmbedder),
    #[cfg(feature = "embeddings")]
    FastEmbed(Mutex<TextEmbedding>),
}

impl Embedder {
    pub fn hashed() -> Self {
        Self::Hashed(HashedEmbedder::new(HASHED_DIMENSIONS))
    }

    /// Load the configured embedder once at startup.
    #[cfg(feature = "embeddings")]
    pub fn load() -> Result<Self> {
        let model = TextEmbedding::try_new(Default::default())?;
        Ok(Self::FastEmbed(Mutex::new(model)))
    }

    #[cfg(not(feature = "embeddings"))]
    pub fn load() -> Result<Self> {
        Ok(Self::hashed())
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Hashed(_) => "hashed-bow",
            #[cfg(feature = "embeddings")]
            Self::FastEmbed(_) => "fastembed-minilm",
        }
    }

    pub fn embed(&self, documents: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        match self {
            Self::Hashed(embedder) => Ok(documents.iter().map(|d| embedder.embed(d)).collect()),
            #[cfg(feature = "embeddings")]
            Self::FastEmbed(model) => {
                let mut model = model
                    .lock()
                    .map_err(|_| BackendError::Embedding("embedding model poisoned".into()))?;
                let inputs: Vec<&str> = documents.iter().map(String::as_str).collect();
                model
                    .embed(inputs, None)
                    .map_err(|e| BackendError::Embedding(e.to_string()))
            }
        }
    }
}

/// Feature-hashing embedder with signed buckets and L2 normalization.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn embed(&self, document: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in document.split_whitespace() {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if (hash >> 63) & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        normalize_in_place(&mut vector);
        vector
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}

fn normalize_in_place(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Mean of a set of vectors; empty input yields an empty vector.
pub fn centroid(vectors: &[&[f32]]) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };
    let mut sum = vec![0.0f32; first.len()];
    for vector in vectors {
        for (acc, value) in sum.iter_mut().zip(vector.iter()) {
            *acc += value;
        }
    }
    let n = vectors.len() as f32;
    sum.iter_mut().for_each(|v| *v /= n);
    sum
}
