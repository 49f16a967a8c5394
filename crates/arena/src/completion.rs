//! Text-completion API client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Source of completion text for a prompt.
#[allow(async_fn_in_trait)]
pub trait Completer {
    async fn complete(&mut self, prompt: &str, temperature: f32) -> Result<String, ArenaError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

impl CompletionResponse {
    /// Text of the first choice; empty when the API returned none.
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .unwrap_or_default()
    }
}

/// Client for an OpenAI-style `/completions` endpoint
pub struct CompletionClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(config: &ArenaConfig, api_key: String) -> Result<Self, ArenaError> {
        let client = Client::builder()
            .user_agent("LlmArena/1.0")
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/completions", config.openai_base_url.trim_end_matches('/')),
            api_key,
            model: config.openai_model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

impl Completer for CompletionClient {
    async fn complete(&mut self, prompt: &str, temperature: f32) -> Result<String, ArenaError> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ArenaError::Completion(format!("HTTP {status}: {body}")));
        }

        let body = resp.text().await?;
        let text = serde_json::from_str::<CompletionResponse>(&body)?.into_text();
        debug!(temperature, completion = %text, "Completion received");
        Ok(text)
    }
}
