//! Local llama.cpp text generation, enabled by the `summaries` feature.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use llama_cpp_rs::{LLama, LLamaContextParams, LLamaModel, TokenId};

use crate::error::BackendError;

const MAX_NEW_TOKENS: usize = 256;

pub struct LlamaGenerator {
    ctx: Arc<Mutex<LLama>>,
}

impl LlamaGenerator {
    pub fn load(model_path: &Path) -> Result<Self> {
        let model = LLamaModel::load_from_file(model_path, Default::default())?;
        let ctx = LLama::new(model, LLamaContextParams::default())?;
        Ok(Self {
            ctx: Arc::new(Mutex::new(ctx)),
        })
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let ctx = Arc::clone(&self.ctx);
        let prompt = prompt.to_string();
        let response = super::run_blocking(move || evaluate(&ctx, &prompt)).await?;
        let text = response.trim().to_string();
        if text.is_empty() {
            return Err(BackendError::EmptyCompletion);
        }
        Ok(text)
    }
}

fn evaluate(ctx: &Mutex<LLama>, prompt: &str) -> Result<String, BackendError> {
    let ctx = ctx
        .lock()
        .map_err(|_| BackendError::other("llama context poisoned"))?;
    let tokens: Vec<TokenId> = ctx
        .model()
        .tokenize(prompt, true)
        .map_err(|e| BackendError::other(e.to_string()))?;
    ctx.evaluate(&tokens, None, MAX_NEW_TOKENS, None)
        .map_err(|e| BackendError::other(e.to_string()))
}
