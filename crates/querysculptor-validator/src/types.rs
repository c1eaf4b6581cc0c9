use crate::error::ValidatorError;

const SCALAR_NAMES: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

const COMMON_MISTAKES: &[(&str, &str)] = &[
    ("integer", "Int"),
    ("int", "Int"),
    ("number", "Int"),
    ("float", "Float"),
    ("double", "Float"),
    ("bool", "Boolean"),
    ("boolean", "Boolean"),
    ("string", "String"),
    ("str", "String"),
    ("text", "String"),
    ("id", "ID"),
];

fn bracket_depth(type_string: &str) -> usize {
    type_string.chars().filter(|c| *c == '[').count()
}

fn bare_name(type_string: &str) -> &str {
    type_string
        .trim_end_matches('!')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches('!')
}

/// Parses `type_string` inside a minimal probe operation, the same trick
/// `apollo_compiler` itself has no standalone "is this a valid type" entry
/// point for: a syntactically invalid type string fails to parse as part of
/// a variable definition just as surely as it would in a real document.
fn probe_parses(type_string: &str) -> bool {
    let probe = format!("query QuerySculptorProbe($v: {type_string}) {{ __typename }}");
    apollo_compiler::ast::Document::parse(&probe, "probe.graphql").is_ok()
}

/// Rejects empty type strings, type strings nested more than 5 `[`s deep,
/// and anything that fails to probe-parse.
pub fn validate_variable_type(type_string: &str) -> Result<(), ValidatorError> {
    if type_string.trim().is_empty() {
        return Err(ValidatorError::InvalidVariableType {
            type_string: type_string.to_string(),
            reason: "type must not be empty".to_string(),
        });
    }
    if bracket_depth(type_string) > 5 {
        return Err(ValidatorError::InvalidVariableType {
            type_string: type_string.to_string(),
            reason: "list nesting exceeds the limit of 5".to_string(),
        });
    }
    if !probe_parses(type_string) {
        return Err(ValidatorError::InvalidVariableType {
            type_string: type_string.to_string(),
            reason: "not a syntactically valid GraphQL type".to_string(),
        });
    }
    Ok(())
}

/// Recognizes the five built-in scalars after stripping `!`/`[]` wrapping;
/// otherwise probe-parses, and on failure checks `COMMON_MISTAKES` for a
/// "Did you mean 'X'?"-style correction before giving up.
pub fn validate_graphql_type(type_string: &str) -> Result<(), ValidatorError> {
    let bare = bare_name(type_string);
    if SCALAR_NAMES.contains(&bare) {
        return Ok(());
    }
    if probe_parses(type_string) {
        return Ok(());
    }
    let lower = bare.to_ascii_lowercase();
    let suggestion = COMMON_MISTAKES
        .iter()
        .find(|(mistake, _)| *mistake == lower)
        .map(|(_, correct)| format!(" Did you mean '{correct}'?"))
        .unwrap_or_default();
    Err(ValidatorError::InvalidGraphQLType {
        type_string: type_string.to_string(),
        suggestion,
    })
}
