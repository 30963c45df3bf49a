use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Failure kinds surfaced by the classifier core. Each kind maps to a
/// distinct caller-visible message; none of them is retried internally.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Network/transport failure while retrieving the model artifact.
    #[error("failed to fetch model artifact: {0}")]
    ModelFetch(String),

    /// Fetched or on-disk bytes are not a loadable model.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Input bytes could not be decoded as an RGB image.
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// The scoring call itself failed. Indicates a broken contract
    /// between preprocessing and the model, not bad user input.
    #[error("inference error: {0}")]
    Inference(String),
}
