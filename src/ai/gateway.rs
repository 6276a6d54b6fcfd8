use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI gateway rate limit hit")]
    RateLimited,
    #[error("AI gateway usage quota exhausted")]
    QuotaExceeded,
    #[error("AI gateway returned status {status}")]
    Upstream { status: u16, body: String },
    #[error("AI gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI gateway response had no content")]
    EmptyResponse,
    #[error("AI response is not valid JSON")]
    ParseFailure { raw: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct AiGateway {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AiGateway {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.ai_gateway_url.clone(),
            api_key: config.ai_api_key.clone(),
            model: config.ai_model.clone(),
        }
    }

    /// Issues one completion call, no retries, and returns the raw text of
    /// the first choice.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, AiError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status.as_u16(), body));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AiError::EmptyResponse)?;

        info!(model = %self.model, chars = content.len(), "AI gateway completion received");
        Ok(content)
    }
}

fn map_error_status(status: u16, body: String) -> AiError {
    match status {
        429 => AiError::RateLimited,
        402 => AiError::QuotaExceeded,
        _ => AiError::Upstream { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_maps_to_rate_limited() {
        assert!(matches!(
            map_error_status(429, String::new()),
            AiError::RateLimited
        ));
    }

    #[test]
    fn status_402_maps_to_quota_exceeded() {
        assert!(matches!(
            map_error_status(402, String::new()),
            AiError::QuotaExceeded
        ));
    }

    #[test]
    fn other_statuses_keep_status_and_body() {
        match map_error_status(503, "overloaded".to_string()) {
            AiError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
