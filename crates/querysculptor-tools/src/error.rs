use serde::Serialize;

use querysculptor_complexity::ComplexityError;
use querysculptor_executor::ExecutorError;
use querysculptor_model::ModelError;
use querysculptor_schema::SchemaError;
use querysculptor_session::SessionError;
use querysculptor_validator::ValidatorError;

/// The failure-family taxonomy attached to every tool's error response, so
/// an agent can tell a retryable mistake (`VALIDATION`, `SCHEMA`) from one
/// it cannot fix by itself (`UPSTREAM`, `INTERNAL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    Schema,
    Limit,
    Session,
    Store,
    Upstream,
    Timeout,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
    pub path: Option<String>,
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn session_not_found(session_id: &str) -> Self {
        Self::new(ErrorKind::Session, format!("session '{session_id}' not found or expired"))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<ValidatorError> for ToolError {
    fn from(err: ValidatorError) -> Self {
        let suggestion = err.suggestion();
        let kind = match &err {
            ValidatorError::UnknownField { .. }
            | ValidatorError::UnknownArgument { .. }
            | ValidatorError::SchemaValidationFailed { .. } => ErrorKind::Schema,

            ValidatorError::PaginationExceeded { .. }
            | ValidatorError::InputTooDeep { .. }
            | ValidatorError::InputTooLarge { .. }
            | ValidatorError::StringTooLong { .. }
            | ValidatorError::ControlCharacters { .. } => ErrorKind::Limit,

            ValidatorError::InvalidName { .. }
            | ValidatorError::ValueShapeMismatch { .. }
            | ValidatorError::InvalidGraphQLType { .. }
            | ValidatorError::InvalidVariableType { .. }
            | ValidatorError::SyntaxError { .. }
            | ValidatorError::UnknownVariable { .. } => ErrorKind::Validation,
        };
        Self {
            kind,
            message: err.to_string(),
            suggestion,
            path: None,
        }
    }
}

impl From<ModelError> for ToolError {
    fn from(err: ModelError) -> Self {
        Self::new(ErrorKind::Validation, err.to_string())
    }
}

impl From<SchemaError> for ToolError {
    fn from(err: SchemaError) -> Self {
        let kind = match &err {
            SchemaError::Timeout { .. } => ErrorKind::Timeout,
            _ => ErrorKind::Upstream,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<SessionError> for ToolError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound { id } => Self::session_not_found(&id),
            other => Self::new(ErrorKind::Store, other.to_string()),
        }
    }
}

impl From<ComplexityError> for ToolError {
    fn from(err: ComplexityError) -> Self {
        Self::new(ErrorKind::Limit, err.to_string())
    }
}

impl From<ExecutorError> for ToolError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::Syntax(validator_err) => validator_err.into(),
            ExecutorError::Complexity(errors) => Self::new(
                ErrorKind::Limit,
                errors.into_iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "),
            ),
            ExecutorError::Timeout => Self::new(ErrorKind::Timeout, "upstream request timed out"),
            ExecutorError::RequestFailed { message } => Self::new(ErrorKind::Upstream, message),
            ExecutorError::NonSuccessStatus { status } => {
                Self::new(ErrorKind::Upstream, format!("upstream returned HTTP {status}"))
            }
        }
    }
}
