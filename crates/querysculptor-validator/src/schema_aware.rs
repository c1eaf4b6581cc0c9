use querysculptor_model::{FieldNode, QueryStructure};
use querysculptor_schema::{ArgumentSignature, CachedSchema};

use crate::error::ValidatorError;
use crate::suggest::did_you_mean_suffix;

/// Rejects a field name missing from `parent_type`, suggesting the nearest
/// sibling field name when one is close enough.
pub fn validate_field_in_schema(
    schema: &CachedSchema,
    parent_type: &str,
    field_name: &str,
) -> Result<(), ValidatorError> {
    let fields = schema.fields_of(parent_type).unwrap_or_default();
    if fields.iter().any(|f| f.name == field_name) {
        return Ok(());
    }
    let suggestion = did_you_mean_suffix(field_name, fields.iter().map(|f| f.name.as_str()));
    Err(ValidatorError::UnknownField {
        parent_type: parent_type.to_string(),
        field: field_name.to_string(),
        suggestion,
    })
}

/// Rejects an argument name missing from a field's signature. On a miss,
/// lists up to 5 available argument names, or says the field takes none.
pub fn validate_argument_in_schema(
    field: &querysculptor_schema::FieldSignature,
    arg_name: &str,
) -> Result<(), ValidatorError> {
    if field.arguments.iter().any(|a| a.name == arg_name) {
        return Ok(());
    }
    let suggestion = if field.arguments.is_empty() {
        " This field does not accept any arguments.".to_string()
    } else {
        let available = field
            .arguments
            .iter()
            .take(5)
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(" Available arguments: {available}.")
    };
    Err(ValidatorError::UnknownArgument {
        field: field.name.clone(),
        argument: arg_name.to_string(),
        suggestion,
    })
}

/// Looks up the GraphQL type string of `argName` on the field reached by
/// following `fieldPath` from `rootType`, one selection-key segment at a
/// time.
pub fn get_argument_type(
    schema: &CachedSchema,
    root_type: &str,
    field_path: &[&str],
    arg_name: &str,
) -> Option<String> {
    let field = schema.field_at_path(root_type, field_path)?;
    field
        .arguments
        .iter()
        .find(|a| a.name == arg_name)
        .map(|a: &ArgumentSignature| a.type_string.clone())
}

/// Walks `structure` against `schema`, collecting one warning per
/// non-null argument that a selected field declares but the structure does
/// not supply a value for. Never fails the operation — these are warnings,
/// not errors.
pub fn validate_required_arguments(
    schema: &CachedSchema,
    root_type: &str,
    structure: &QueryStructure,
) -> Vec<String> {
    let mut warnings = Vec::new();
    for (key, field) in &structure.fields {
        walk_field(schema, root_type, key, field, &mut warnings);
    }
    warnings
}

fn walk_field(
    schema: &CachedSchema,
    parent_type: &str,
    path: &str,
    field: &FieldNode,
    warnings: &mut Vec<String>,
) {
    let Some(signature) = schema.field(parent_type, &field.field_name) else {
        return;
    };
    for arg in &signature.arguments {
        let is_required = arg.type_string.ends_with('!') && arg.default_value.is_none();
        if is_required && !field.args.contains_key(&arg.name) {
            warnings.push(format!(
                "Field '{path}' is missing required argument '{}' of type '{}'.",
                arg.name, arg.type_string
            ));
        }
    }
    let child_type = querysculptor_schema::bare_type_name(&signature.type_string);
    for (child_key, child) in &field.fields {
        walk_field(schema, &child_type, &format!("{path}.{child_key}"), child, warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_field_suggestion_is_embedded_in_unknown_field_error() {
        // Field suggestion logic is exercised against a live CachedSchema
        // in querysculptor-tools' integration tests, where a schema fixture
        // is available; here we only check the error shape compiles and
        // carries the suggestion text through `Display`.
        let err = ValidatorError::UnknownField {
            parent_type: "Query".into(),
            field: "pokemn".into(),
            suggestion: " Did you mean 'pokemons'?".into(),
        };
        assert_eq!(
            err.to_string(),
            "Field 'pokemn' not found on type 'Query'. Did you mean 'pokemons'?"
        );
    }
}
