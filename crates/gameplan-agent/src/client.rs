use crate::error::AgentError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::Result;
use std::time::Duration;

/// A thin client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ChatClient {
    /// Build a client. `base_url` is the API root, without a trailing slash
    /// (one is tolerated); `api_key_env` names the env var holding the key.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key_env: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let api_key = std::env::var(api_key_env)
            .map_err(|_| AgentError::MissingApiKey(api_key_env.to_string()))?;
        Ok(Self::with_key(base_url, model, api_key, timeout_secs))
    }

    /// Build a client with an explicit key. Used by tests against mock servers.
    pub fn with_key(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one chat completion and return the assistant text.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.4),
        };
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(%url, model = %self.model, "sending completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .first_content()
            .ok_or(AgentError::EmptyResponse)?
            .to_string();
        tracing::debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}
