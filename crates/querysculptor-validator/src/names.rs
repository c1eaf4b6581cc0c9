use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidatorError;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("static pattern is valid"));

/// Invariant 1: operation, fragment, variable (without `$`), and alias
/// names all share this shape.
pub fn is_valid_graphql_name(s: &str) -> bool {
    NAME_PATTERN.is_match(s)
}

pub fn validate_operation_name(name: &str) -> Result<(), ValidatorError> {
    validate_named(name, "operation name")
}

pub fn validate_field_alias(alias: &str) -> Result<(), ValidatorError> {
    validate_named(alias, "field alias")
}

pub fn validate_fragment_name(name: &str) -> Result<(), ValidatorError> {
    validate_named(name, "fragment name")
}

/// Variable names must start with `$`; the remainder must match the
/// standard name shape.
pub fn validate_variable_name(name: &str) -> Result<(), ValidatorError> {
    let bare = name.strip_prefix('$').ok_or_else(|| ValidatorError::InvalidName {
        name: name.to_string(),
        context: "variable name (must start with '$')".to_string(),
    })?;
    validate_named(bare, "variable name")
}

fn validate_named(name: &str, context: &str) -> Result<(), ValidatorError> {
    if is_valid_graphql_name(name) {
        Ok(())
    } else {
        Err(ValidatorError::InvalidName {
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_leading_underscore_and_digits() {
        assert!(is_valid_graphql_name("_private2"));
    }

    #[test]
    fn rejects_leading_digit() {
        assert!(!is_valid_graphql_name("2fast"));
    }

    #[test]
    fn variable_name_requires_dollar_prefix() {
        assert!(validate_variable_name("n").is_err());
        assert!(validate_variable_name("$n").is_ok());
    }
}
