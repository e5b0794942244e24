use crate::config::Config;
use crate::wire::{GenerationRequest, GenerationResponse};
use fs_err as fs;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Install the stderr subscriber. `RUST_LOG` wins over the `--debug` default.
pub fn init_tracing(debug: bool) {
    let default = if debug { "career_compass=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

/// Writes request/response artifacts of each model exchange under `<data_dir>/tx/<id>/`.
#[derive(Debug, Clone)]
pub struct Recorder {
    root: PathBuf,
    save_request: bool,
    save_response: bool,
}

fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join("tx").join(tx.to_string())
}

impl Recorder {
    pub fn new(root: impl Into<PathBuf>, save_request: bool, save_response: bool) -> Self {
        Self { root: root.into(), save_request, save_response }
    }

    /// `None` when neither artifact kind is enabled.
    pub fn from_config(cfg: &Config) -> Option<Self> {
        (cfg.save_request || cfg.save_response)
            .then(|| Self::new(&cfg.data_dir, cfg.save_request, cfg.save_response))
    }

    pub fn save_stage(
        &self,
        req: &GenerationRequest,
        resp: &GenerationResponse,
    ) -> anyhow::Result<SavedPaths> {
        let dir = tx_dir(&self.root, req.transaction.id);
        fs::create_dir_all(&dir)?;
        let stage = req.flow.as_str();

        let mut request_path = None;
        let mut response_path = None;

        if self.save_request {
            let p = dir.join(format!("{stage}.request.json"));
            fs::write(&p, to_string_pretty(req)?)?;
            request_path = Some(p);
        }

        if self.save_response {
            let p = dir.join(format!("{stage}.response.json"));
            fs::write(&p, to_string_pretty(resp)?)?;
            response_path = Some(p);
        }

        Ok(SavedPaths { dir, request: request_path, response: response_path })
    }
}
