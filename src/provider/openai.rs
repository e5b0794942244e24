use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::errors::CompassError;
use crate::wire::{parse_model_output, GenerationRequest, GenerationResponse};

/// OpenAI chat completions, forcing a JSON object response.
pub struct OpenAIProvider {
    model: String,
    api_key: String,
    api_base: String,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(model: String, api_key: String, api_base: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            model,
            api_key,
            api_base,
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[async_trait]
impl super::Provider for OpenAIProvider {
    async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}/v1/chat/completions", self.api_base.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": req.instruction.system },
                { "role": "user", "content": req.instruction.user }
            ],
            "temperature": 0.7,
            "response_format": { "type": "json_object" }
        });

        debug!(flow = req.flow.as_str(), %url, "openai request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompassError::Provider(format!("openai request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CompassError::Provider(format!("openai read body failed: {e}")))?;
        debug!(%status, body = %text, "openai raw response");

        if !status.is_success() {
            return Err(CompassError::Provider(format!("OpenAI API error ({status}): {text}")).into());
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| CompassError::Schema(format!("failed to parse OpenAI response: {e}")))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompassError::Schema("openai: empty choices".into()))?;

        Ok(parse_model_output(&content, &req.outputs)?)
    }
}
