use thiserror::Error;

/// Every failure family the validator can raise. `querysculptor-tools`
/// maps each variant onto its own `ErrorKind`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidatorError {
    #[error("'{name}' is not a valid GraphQL name for {context}")]
    InvalidName { name: String, context: String },

    #[error("Field '{field}' not found on type '{parent_type}'.{suggestion}")]
    UnknownField {
        parent_type: String,
        field: String,
        suggestion: String,
    },

    #[error("Argument '{argument}' not found on field '{field}'.{suggestion}")]
    UnknownArgument {
        field: String,
        argument: String,
        suggestion: String,
    },

    #[error("value for '{name}' does not match type '{type_string}': {reason}")]
    ValueShapeMismatch {
        name: String,
        type_string: String,
        reason: String,
    },

    #[error("Pagination value for '{arg_name}' ({value}) exceeds maximum of 500.")]
    PaginationExceeded { arg_name: String, value: i64 },

    #[error("Invalid type '{type_string}'.{suggestion}")]
    InvalidGraphQLType {
        type_string: String,
        suggestion: String,
    },

    #[error("variable type '{type_string}' is not valid: {reason}")]
    InvalidVariableType { type_string: String, reason: String },

    #[error("input value for '{name}' is nested {depth} levels deep, exceeding the limit of 10")]
    InputTooDeep { name: String, depth: usize },

    #[error("input value for '{name}' has {count} elements, exceeding the limit of 1000")]
    InputTooLarge { name: String, count: usize },

    #[error("'{name}' is {length} characters long, exceeding the limit of 8192")]
    StringTooLong { name: String, length: usize },

    #[error("'{name}' contains control characters, which are not allowed")]
    ControlCharacters { name: String },

    #[error("document failed to parse: {message}")]
    SyntaxError { message: String },

    #[error("document failed schema validation: {messages}")]
    SchemaValidationFailed { messages: String },

    #[error("unknown variable '${name}' referenced")]
    UnknownVariable { name: String },
}

impl ValidatorError {
    /// The "Did you mean 'X'?" suffix some variants carry, if any.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ValidatorError::UnknownField { suggestion, .. }
            | ValidatorError::UnknownArgument { suggestion, .. }
            | ValidatorError::InvalidGraphQLType { suggestion, .. } => {
                if suggestion.is_empty() {
                    None
                } else {
                    Some(suggestion.trim().to_string())
                }
            }
            _ => None,
        }
    }
}
