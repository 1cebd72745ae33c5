use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}
