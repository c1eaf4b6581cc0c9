use apollo_compiler::ast::Document;
use apollo_compiler::validation::Valid;
use apollo_compiler::{ExecutableDocument, Schema};

use crate::error::ValidatorError;

/// Parses `document_text` as a GraphQL executable document, without
/// checking it against any schema. Used by `build-query` before a schema
/// is necessarily available, and by tests that only care about syntax.
pub fn validate_query_syntax(document_text: &str) -> Result<(), ValidatorError> {
    Document::parse(document_text, "query.graphql")
        .map(|_| ())
        .map_err(|e| ValidatorError::SyntaxError { message: e.to_string() })
}

/// Parses and validates `document_text` against `schema`, the step
/// `execute-query` runs immediately before complexity analysis. Surfaces
/// every diagnostic apollo-compiler raises, joined, since query-builder
/// tools typically need to see every problem at once rather than one at a
/// time.
pub fn validate_against_schema(document_text: &str, schema: &Valid<Schema>) -> Result<(), ValidatorError> {
    ExecutableDocument::parse_and_validate(schema, document_text, "query.graphql").map_err(|e| {
        ValidatorError::SchemaValidationFailed {
            messages: e.to_string(),
        }
    })?;
    Ok(())
}
