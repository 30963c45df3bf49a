use ndarray::{Array4, CowArray};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;

use crate::error::{ClassifierError, Result};

/// Scoring function backing the inference engine: input tensor of shape
/// (1, H, W, 3) in, dog-probability in [0.0, 1.0] out.
pub trait Model {
    fn score(&self, batch: &Array4<f32>) -> Result<f32>;
}

impl<M: Model + ?Sized> Model for &M {
    fn score(&self, batch: &Array4<f32>) -> Result<f32> {
        (**self).score(batch)
    }
}

/// ONNX-backed classifier model. `Session::run` takes `&self`, so a single
/// loaded instance can serve concurrent predictions without locking.
pub struct OnnxModel {
    session: Session,
}

impl OnnxModel {
    /// Deserializes a model from raw artifact bytes. Fails with
    /// `ModelUnavailable` when the bytes are not a valid ONNX graph
    /// (for example an HTML error page saved in place of the weights).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let build = || -> std::result::Result<Session, ort::Error> {
            SessionBuilder::new()?
                .with_execution_providers([CPUExecutionProvider::default().build()])?
                .with_optimization_level(GraphOptimizationLevel::Level3)?
                .commit_from_memory(bytes)
        };
        let session = build()
            .map_err(|e| ClassifierError::ModelUnavailable(format!("not a loadable model: {e}")))?;
        Ok(Self { session })
    }
}

impl Model for OnnxModel {
    fn score(&self, batch: &Array4<f32>) -> Result<f32> {
        let xs = CowArray::from(batch.view().into_dyn());
        let input_data = ort::inputs![xs.view()]
            .map_err(|e| ClassifierError::Inference(format!("failed to bind input: {e}")))?;
        let ys = self
            .session
            .run(input_data)
            .map_err(|e| ClassifierError::Inference(format!("model run failed: {e}")))?;

        let (_name, value) = ys
            .iter()
            .next()
            .ok_or_else(|| ClassifierError::Inference("model produced no outputs".to_string()))?;
        let tensor = value
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("unexpected output tensor: {e}")))?;
        tensor
            .iter()
            .next()
            .copied()
            .ok_or_else(|| ClassifierError::Inference("model output is empty".to_string()))
    }
}
