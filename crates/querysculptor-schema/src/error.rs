use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SchemaError {
    #[error("introspection request to '{endpoint}' timed out")]
    Timeout { endpoint: String },

    #[error("introspection request to '{endpoint}' failed: {message}")]
    RequestFailed { endpoint: String, message: String },

    #[error("introspection against '{endpoint}' returned HTTP {status}")]
    NonSuccessStatus { endpoint: String, status: u16 },

    #[error("introspection against '{endpoint}' returned GraphQL errors: {messages}")]
    GraphQlErrors { endpoint: String, messages: String },

    #[error("introspection response from '{endpoint}' could not be synthesized into SDL: {message}")]
    SynthesisFailed { endpoint: String, message: String },

    #[error("schema synthesized from '{endpoint}' failed to parse/validate: {message}")]
    InvalidSchema { endpoint: String, message: String },
}
