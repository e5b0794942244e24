use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Provider;
use crate::errors::CompassError;
use crate::wire::{parse_model_output, GenerationRequest, GenerationResponse, Instruction};

pub struct Ollama {
    pub model: String,
    pub url: String,
    client: Client,
}

impl Ollama {
    pub fn new(model: String, url: String, timeout: Duration) -> Result<Self> {
        Ok(Self { model, url, client: Client::builder().timeout(timeout).build()? })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    stream: bool,
    format: &'a str,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: String,
}

fn to_messages(ins: &Instruction) -> Vec<Msg<'_>> {
    vec![
        Msg { role: "system", content: &ins.system },
        Msg { role: "user", content: &ins.user },
    ]
}

#[async_trait]
impl Provider for Ollama {
    async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: to_messages(&req.instruction),
            stream: false,
            format: "json",
            options: OllamaOptions { temperature: 0.7 },
        };

        debug!(flow = req.flow.as_str(), %url, "ollama request");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompassError::Provider(format!("ollama request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CompassError::Provider(format!("ollama read body failed: {e}")))?;
        debug!(%status, body = %text, "ollama raw response");

        if !status.is_success() {
            return Err(CompassError::Provider(format!("Ollama error ({status}): {text}")).into());
        }

        // Some proxies return the model text directly instead of the chat envelope.
        let content = match serde_json::from_str::<ChatResponse>(&text) {
            Ok(c) => c.message.content,
            Err(_) => text,
        };

        Ok(parse_model_output(&content, &req.outputs)?)
    }
}
