use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComplexityError {
    #[error("query depth {depth} exceeds the limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("field count {count} exceeds the limit of {limit}")]
    FieldCountExceeded { count: usize, limit: usize },

    #[error("complexity score {score:.1} exceeds the limit of {limit:.1}")]
    ScoreExceeded { score: f64, limit: f64 },
}
