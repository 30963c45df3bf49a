pub mod cli;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod model;
pub mod postprocess;
pub mod preprocess;
pub mod provider;

pub use crate::cli::Args;
pub use crate::engine::InferenceEngine;
pub use crate::error::{ClassifierError, Result};
pub use crate::fetch::{decode_image, load_image, ImageSource};
pub use crate::model::{Model, OnnxModel};
pub use crate::postprocess::{decide, Label, Prediction};
pub use crate::preprocess::{PreprocessConfig, Processor};
pub use crate::provider::{ArtifactFetcher, HttpFetcher, ModelLoader, ModelProvider, OnnxLoader};
