use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Provider;
use crate::errors::CompassError;
use crate::wire::{parse_model_output, GenerationRequest, GenerationResponse};

pub struct Anthropic {
    pub model: String,
    pub api_key: String,
    pub api_base: String,
    pub api_version: String,
    client: Client,
}

impl Anthropic {
    pub fn new(
        model: String,
        api_key: String,
        api_base: String,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            model,
            api_key,
            api_base,
            api_version,
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Msg<'a>>,
    system: &'a str,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: String,
    #[serde(default)]
    r#type: String,
}

#[async_trait]
impl Provider for Anthropic {
    async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let body = MsgRequest {
            model: &self.model,
            max_tokens: 4096,
            messages: vec![Msg { role: "user", content: &req.instruction.user }],
            system: &req.instruction.system,
        };

        debug!(flow = req.flow.as_str(), %url, "anthropic request");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompassError::Provider(format!("anthropic request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CompassError::Provider(format!("anthropic read body failed: {e}")))?;
        debug!(%status, body = %text, "anthropic raw response");

        if !status.is_success() {
            return Err(CompassError::Provider(format!("Anthropic API error ({status}): {text}")).into());
        }

        let parsed: MsgResponse = serde_json::from_str(&text)
            .map_err(|e| CompassError::Schema(format!("anthropic response parse error: {e}")))?;

        let content = parsed
            .content
            .into_iter()
            .find(|b| b.r#type == "text" && !b.text.is_empty())
            .map(|b| b.text)
            .ok_or_else(|| CompassError::Schema("anthropic: empty content".into()))?;

        Ok(parse_model_output(&content, &req.outputs)?)
    }
}
