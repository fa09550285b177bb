//! OpenAI-compatible completion backend
//!
//! Works against any chat-completions endpoint (hosted or local). The
//! request timeout is baked into the HTTP client; a timeout surfaces as
//! `LlmError::Timeout` and the engine treats it like any other
//! collaborator failure. No retries here by design: a failed call fails
//! the turn safely.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use chatai_config::LlmSettings;
use chatai_core::{LanguageModel, Result};

use crate::LlmError;

/// Completion client configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub model: String,
    /// Base endpoint, e.g. `https://api.openai.com/v1`.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout: Duration,
}

impl From<&LlmSettings> for OpenAiConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: settings.timeout(),
        }
    }
}

/// OpenAI-compatible backend
pub struct OpenAiBackend {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiConfig) -> std::result::Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    async fn chat(&self, prompt: &str) -> std::result::Result<String, LlmError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: false,
        };

        let mut builder = self.client.post(self.api_url()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("empty choices".to_string()))
    }
}

#[async_trait]
impl LanguageModel for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let started = std::time::Instant::now();
        let result = self.chat(prompt).await;
        match &result {
            Ok(text) => tracing::debug!(
                latency_ms = started.elapsed().as_millis() as u64,
                chars = text.len(),
                "model completion finished"
            ),
            Err(e) => tracing::warn!(
                latency_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "model completion failed"
            ),
        }
        Ok(result.map(|t| t.trim().to_string())?)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
