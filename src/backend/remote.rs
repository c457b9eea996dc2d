//! OpenAI-compatible chat completion client used for summaries and topic names.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{config::LlmSettings, error::BackendError};

const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(8);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking-per-call text generation against a remote endpoint, with a
/// per-request timeout and bounded retries.
pub struct RemoteGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_retries: u32,
}

impl RemoteGenerator {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent("feedback-insights/0.1")
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_retries: settings.max_retries,
        })
    }

    /// Send a single-turn prompt and return the trimmed completion.
    pub async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 0;
        loop {
            match self.send(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if attempt < self.max_retries && err.is_retryable() => {
                    attempt += 1;
                    warn!(attempt, max = self.max_retries, error = %err, "completion failed; retrying");
                    sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, BackendError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
            max_tokens: 256,
        };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Http(err)
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatResponse = response.json().await?;
        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(BackendError::EmptyCompletion);
        }
        debug!(chars = text.len(), "received completion");
        Ok(text)
    }
}
