use thiserror::Error;

/// Domain error type for the pricing service. The HTTP layer maps each
/// variant onto a status code in `http::ApiError`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("{0}")]
    NotFound(String),

    #[error("pricing model is not loaded")]
    ModelNotLoaded,

    #[error("failed to load pricing model: {0}")]
    ModelLoad(String),

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
