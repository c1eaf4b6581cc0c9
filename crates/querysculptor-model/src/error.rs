use thiserror::Error;

/// Structural failures the query-state tree itself can detect, independent
/// of any schema. Tool handlers translate these into `ErrorKind::Validation`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate selection key '{key}' at path '{path}'")]
    DuplicateSelectionKey { key: String, path: String },

    #[error("no selection set found at path '{path}'")]
    PathNotFound { path: String },

    #[error("segment '{segment}' of path '{path}' is not a selected field")]
    NotAField { segment: String, path: String },

    #[error("unknown fragment '{name}'")]
    UnknownFragment { name: String },

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },
}
