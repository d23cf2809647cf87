use crate::config::Config;
use crate::models::{ChatMessage, ChatRequest, ChatResponse, QuestionType};
use anyhow::{Context, Result, anyhow, bail};
use std::fmt;
use std::future::Future;

/// A chat-completion backend that turns one prompt into one reply.
pub trait ChatCompletion: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Asks the model for one question of `question_type` about `chunk`.
pub async fn generate_question<C: ChatCompletion>(
    client: &C,
    chunk: &str,
    question_type: QuestionType,
) -> Result<String> {
    client.complete(&question_type.prompt(chunk)).await
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint (Groq by default).
pub struct LLMClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl LLMClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(LLMClient {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ChatCompletion for LLMClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Chat completion returned {}: {}", status, detail);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Malformed chat completion response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("Chat completion returned no content"))
    }
}
