//! Transformer sentiment through ONNX Runtime, enabled by the `onx` feature.
//!
//! Expects a directory holding an exported three-class sequence classifier
//! (`model.onnx`, e.g. `cardiffnlp/twitter-roberta-base-sentiment`) and its
//! `tokenizer.json`. The model's logits are mapped back to `LABEL_0..2`.

use std::{path::Path, sync::Arc};

use anyhow::{anyhow, Context, Result};
use ndarray::{Array2, CowArray, IxDyn};
use ort::{
    tensor::OrtOwnedTensor, Environment, GraphOptimizationLevel, OrtError, Session,
    SessionBuilder, Value,
};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use crate::{error::BackendError, nlp::sentiment::label_from_logits};

const MAX_TOKENS: usize = 512;

pub struct OnnxSentiment {
    inner: Arc<Classifier>,
}

struct Classifier {
    session: Session,
    tokenizer: Tokenizer,
}

impl OnnxSentiment {
    pub fn load(model_dir: &Path) -> Result<Self> {
        let environment = Environment::builder()
            .with_name("feedback-sentiment")
            .build()?
            .into_arc();
        let session = SessionBuilder::new(&environment)?
            .with_optimization_level(GraphOptimizationLevel::Level1)?
            .with_model_from_file(model_dir.join("model.onnx"))
            .context("loading sentiment model")?;

        let mut tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| anyhow!("loading sentiment tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("configuring truncation: {e}"))?;

        debug!(
            inputs = ?session.inputs.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            "loaded sentiment model"
        );
        Ok(Self {
            inner: Arc::new(Classifier { session, tokenizer }),
        })
    }

    pub async fn classify(&self, text: &str) -> Result<String, BackendError> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        super::run_blocking(move || inner.classify(&text)).await
    }
}

impl Classifier {
    fn classify(&self, text: &str) -> Result<String, BackendError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| BackendError::other(format!("tokenizing: {e}")))?;
        let width = encoding.get_ids().len();

        // one row per declared graph input, in declaration order
        let mut arrays: Vec<CowArray<'static, i64, IxDyn>> = Vec::new();
        for input in &self.session.inputs {
            let values = match input.name.as_str() {
                "input_ids" => encoding.get_ids(),
                "attention_mask" => encoding.get_attention_mask(),
                "token_type_ids" => encoding.get_type_ids(),
                other => {
                    return Err(BackendError::other(format!(
                        "unsupported model input '{other}'"
                    )))
                }
            };
            let row: Vec<i64> = values.iter().map(|v| i64::from(*v)).collect();
            let array = Array2::from_shape_vec((1, width), row)
                .map_err(|e| BackendError::other(e.to_string()))?;
            arrays.push(CowArray::from(array.into_dyn()));
        }

        let inputs = arrays
            .iter()
            .map(|array| Value::from_array(self.session.allocator(), array))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ort_error)?;
        let outputs = self.session.run(inputs).map_err(ort_error)?;
        let first = outputs
            .first()
            .ok_or_else(|| BackendError::other("sentiment model produced no output"))?;
        let logits: OrtOwnedTensor<f32, _> = first.try_extract().map_err(ort_error)?;
        let logits: Vec<f32> = logits.view().iter().copied().collect();

        label_from_logits(&logits)
            .map(str::to_string)
            .ok_or_else(|| BackendError::other(format!("expected 3 class scores, got {}", logits.len())))
    }
}

fn ort_error(err: OrtError) -> BackendError {
    BackendError::other(err.to_string())
}
