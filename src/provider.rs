use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing::{debug, info};

use crate::error::{ClassifierError, Result};
use crate::fetch;
use crate::model::OnnxModel;

/// Default remote location of the serialized classifier.
pub const MODEL_URL: &str =
    "https://huggingface.co/catdog-classifier/cats-vs-dogs/resolve/main/cats_vs_dogs.onnx";

const MODEL_FILE: &str = "cats_vs_dogs.onnx";

/// Default on-disk artifact location, under the platform cache directory.
pub fn default_artifact_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catdog")
        .join(MODEL_FILE)
}

/// Pure load step: artifact bytes in, ready-to-score model out.
pub trait ModelLoader {
    type Model;

    fn load(&self, bytes: &[u8]) -> Result<Self::Model>;
}

pub struct OnnxLoader;

impl ModelLoader for OnnxLoader {
    type Model = OnnxModel;

    fn load(&self, bytes: &[u8]) -> Result<OnnxModel> {
        OnnxModel::from_bytes(bytes)
    }
}

/// Side-effecting fetch step, kept behind a trait so tests can count
/// invocations and feed canned bytes without touching the network.
pub trait ArtifactFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: fetch::agent(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        fetch::http_get(&self.agent, url)
            .map_err(|e| ClassifierError::ModelFetch(format!("GET {url}: {e}")))
    }
}

/// Resolves the classifier exactly once per process.
///
/// Cold start with no artifact on disk fetches the bytes from `source_url`,
/// loads them, and only then persists them, so a fetch that yields garbage
/// never leaves a file behind that a later call would trust. Once a model
/// has been materialized it is memoized for the provider's lifetime; a
/// failed materialization leaves the provider untouched and the next call
/// retries.
pub struct ModelProvider<L: ModelLoader = OnnxLoader, F: ArtifactFetcher = HttpFetcher> {
    artifact_path: PathBuf,
    source_url: String,
    loader: L,
    fetcher: F,
    model: OnceLock<L::Model>,
    init: Mutex<()>,
}

impl ModelProvider {
    pub fn onnx(artifact_path: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self::with_parts(artifact_path, source_url, OnnxLoader, HttpFetcher::new())
    }
}

impl<L: ModelLoader, F: ArtifactFetcher> ModelProvider<L, F> {
    pub fn with_parts(
        artifact_path: impl Into<PathBuf>,
        source_url: impl Into<String>,
        loader: L,
        fetcher: F,
    ) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            source_url: source_url.into(),
            loader,
            fetcher,
            model: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Returns the loaded model, materializing it on first call. Repeated
    /// calls reuse the in-memory instance; concurrent cold-start callers
    /// still observe at most one fetch.
    pub fn get_model(&self) -> Result<&L::Model> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        let _guard = self.init.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        let model = self.materialize()?;
        Ok(self.model.get_or_init(|| model))
    }

    fn materialize(&self) -> Result<L::Model> {
        if self.artifact_path.exists() {
            debug!(path = %self.artifact_path.display(), "loading model artifact from disk");
            let bytes = fs::read(&self.artifact_path).map_err(|e| {
                ClassifierError::ModelUnavailable(format!(
                    "failed to read artifact {}: {e}",
                    self.artifact_path.display()
                ))
            })?;
            return self.loader.load(&bytes);
        }

        info!(url = %self.source_url, "model artifact missing, downloading");
        let bytes = self.fetcher.fetch(&self.source_url)?;
        // Validate before persisting: an HTML error page must never end up
        // on disk pretending to be the model.
        let model = self.loader.load(&bytes)?;
        self.persist(&bytes)?;
        info!(path = %self.artifact_path.display(), "model artifact persisted");
        Ok(model)
    }

    fn persist(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.artifact_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ClassifierError::ModelUnavailable(format!(
                    "failed to create artifact directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        fs::write(&self.artifact_path, bytes).map_err(|e| {
            ClassifierError::ModelUnavailable(format!(
                "failed to persist artifact {}: {e}",
                self.artifact_path.display()
            ))
        })
    }
}
