//! The render -> parse -> validate -> analyze -> POST pipeline shared by
//! the `validate-query` and `execute-query` tools.

mod error;
mod executor;

pub use error::ExecutorError;
pub use executor::{execute, prepare, ExecuteOutcome, PreparedQuery, DEFAULT_TIMEOUT, EXECUTE_TIMEOUT};
