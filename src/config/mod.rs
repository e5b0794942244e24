use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Args, PipelineMode, ProviderKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,
    pub data_dir: String,
    pub provider: ProviderKind,
    pub model: String,
    pub pipeline: PipelineMode,
    pub timeout_secs: u64,
    pub min_field_len: usize,
    pub openai_url: String,
    pub anthropic_url: String,
    pub anthropic_version: String,
    pub ollama_url: String,
    /// Environment variable holding the API key; defaults per provider when unset.
    pub api_key_env: Option<String>,
    pub save_request: bool,
    pub save_response: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: "2024-08-01".into(),
            data_dir: default_data_dir().to_string_lossy().into_owned(),
            provider: ProviderKind::OpenAI,
            model: "gpt-4.1-mini".into(),
            pipeline: PipelineMode::TwoStep,
            timeout_secs: 30,
            min_field_len: 10,
            openai_url: "https://api.openai.com".into(),
            anthropic_url: "https://api.anthropic.com".into(),
            anthropic_version: "2023-06-01".into(),
            ollama_url: "http://localhost:11434".into(),
            api_key_env: None,
            save_request: false,
            save_response: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("career-compass"))
        .unwrap_or_else(|| PathBuf::from(".career-compass"))
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config TOML")
    }

    /// Resolve the effective configuration: defaults, then the config file, then flags.
    ///
    /// An explicit `--config` path must exist. Otherwise `config.toml` inside the data
    /// directory is read when present.
    pub fn load(args: &Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::read_file(Path::new(path))?,
            None => {
                let dir = args
                    .data_dir
                    .as_ref()
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir);
                let candidate = dir.join("config.toml");
                if candidate.is_file() {
                    Self::read_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_args(args);
        Ok(cfg)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(p) = args.provider {
            self.provider = p;
        }
        if let Some(m) = &args.model {
            self.model = m.clone();
        }
        if let Some(t) = args.timeout_secs {
            self.timeout_secs = t;
        }
        if let Some(p) = args.pipeline {
            self.pipeline = p;
        }
        if let Some(d) = &args.data_dir {
            self.data_dir = d.clone();
        }
        self.save_request |= args.save_request;
        self.save_response |= args.save_response;
    }

    pub fn state_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("state.json")
    }

    pub fn api_key_var(&self) -> &str {
        match (&self.api_key_env, self.provider) {
            (Some(v), _) => v,
            (None, ProviderKind::OpenAI) => "OPENAI_API_KEY",
            (None, ProviderKind::Anthropic) => "ANTHROPIC_API_KEY",
            (None, ProviderKind::Ollama) => "OLLAMA_API_KEY",
        }
    }
}
