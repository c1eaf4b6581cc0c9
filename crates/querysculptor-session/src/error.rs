use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to serialize session state: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session '{id}' not found")]
    NotFound { id: String },
}
