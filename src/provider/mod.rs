use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::log::Recorder;
use crate::wire::{GenerationRequest, GenerationResponse};

pub mod anthropic;
pub mod ollama;
pub mod openai;

#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResponse>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config) -> Result<DynProvider> {
    let timeout = Duration::from_secs(cfg.timeout_secs);
    let key = std::env::var(cfg.api_key_var()).ok();
    match cfg.provider {
        ProviderKind::OpenAI => {
            let key = key.ok_or_else(|| anyhow!("{} env var is not set", cfg.api_key_var()))?;
            Ok(Box::new(openai::OpenAIProvider::new(
                cfg.model.clone(),
                key,
                cfg.openai_url.clone(),
                timeout,
            )?))
        }
        ProviderKind::Anthropic => {
            let key = key.ok_or_else(|| anyhow!("{} env var is not set", cfg.api_key_var()))?;
            Ok(Box::new(anthropic::Anthropic::new(
                cfg.model.clone(),
                key,
                cfg.anthropic_url.clone(),
                cfg.anthropic_version.clone(),
                timeout,
            )?))
        }
        // Local Ollama needs no key.
        ProviderKind::Ollama => Ok(Box::new(ollama::Ollama::new(
            cfg.model.clone(),
            cfg.ollama_url.clone(),
            timeout,
        )?)),
    }
}

/// One model round trip: logs its outcome and saves artifacts when a recorder is set.
/// Artifact failures are logged, never returned.
pub async fn exchange(
    provider: &dyn Provider,
    recorder: Option<&Recorder>,
    req: &GenerationRequest,
) -> Result<GenerationResponse> {
    let started = Instant::now();
    let result = provider.generate(req).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(resp) => {
            info!(flow = req.flow.as_str(), tx = %req.transaction.id, elapsed_ms, "model exchange ok");
            if let Some(rec) = recorder {
                if let Err(e) = rec.save_stage(req, resp) {
                    warn!(error = %e, "could not save exchange artifacts");
                }
            }
        }
        Err(e) => {
            warn!(flow = req.flow.as_str(), tx = %req.transaction.id, elapsed_ms, error = %e, "model exchange failed")
        }
    }
    result
}
