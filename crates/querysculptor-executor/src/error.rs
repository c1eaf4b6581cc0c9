use querysculptor_complexity::ComplexityError;
use querysculptor_validator::ValidatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("document failed to parse: {0}")]
    Syntax(#[from] ValidatorError),

    #[error("query exceeds configured complexity limits: {0:?}")]
    Complexity(Vec<ComplexityError>),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream request failed: {message}")]
    RequestFailed { message: String },

    #[error("upstream returned non-success status {status}")]
    NonSuccessStatus { status: u16 },
}
