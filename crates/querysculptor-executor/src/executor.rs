use std::time::Duration;

use indexmap::IndexMap;
use querysculptor_builder::render_query_state;
use querysculptor_complexity::analyze;
use querysculptor_model::QueryState;
use querysculptor_schema::CachedSchema;
use querysculptor_validator::{validate_against_schema, validate_query_syntax};

use crate::error::ExecutorError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const EXECUTE_TIMEOUT: Duration = Duration::from_secs(60);

/// A rendered, schema-validated, complexity-checked document ready to send
/// upstream (or to hand back from `validate-query`, which stops here).
pub struct PreparedQuery {
    pub document: String,
    pub warnings: Vec<String>,
}

/// Steps 1-4 of the executor pipeline: render, parse, validate against
/// `schema`, and run the complexity analyzer. Shared by `validate-query`
/// (which returns after this) and `execute-query` (which goes on to POST).
pub fn prepare(state: &QueryState, schema: &CachedSchema) -> Result<PreparedQuery, ExecutorError> {
    let document = render_query_state(state);
    validate_query_syntax(&document)?;
    validate_against_schema(&document, schema.compiled())?;

    let report = analyze(&state.query_structure, &state.fragments);
    if !report.is_within_limits() {
        return Err(ExecutorError::Complexity(report.errors));
    }

    Ok(PreparedQuery {
        document,
        warnings: report.warnings,
    })
}

pub struct ExecuteOutcome {
    pub upstream_response: serde_json::Value,
    pub warnings: Vec<String>,
}

/// Runs the full pipeline and POSTs the prepared document to `endpoint`,
/// merging `env_headers` under the session's own headers (session wins)
/// and bounding the call with `timeout`.
pub async fn execute(
    http: &reqwest::Client,
    endpoint: &str,
    env_headers: &IndexMap<String, String>,
    state: &QueryState,
    schema: &CachedSchema,
    timeout: Duration,
) -> Result<ExecuteOutcome, ExecutorError> {
    let prepared = prepare(state, schema)?;

    let mut headers = env_headers.clone();
    for (key, value) in &state.headers {
        headers.insert(key.clone(), value.clone());
    }

    let body = serde_json::json!({
        "query": prepared.document,
        "variables": state.variables_values,
        "operationName": state.operation_name,
    });

    let mut request = http.post(endpoint).json(&body);
    for (key, value) in &headers {
        request = request.header(key, value);
    }

    let response = tokio::time::timeout(timeout, request.send())
        .await
        .map_err(|_| ExecutorError::Timeout)?
        .map_err(|err| ExecutorError::RequestFailed { message: err.to_string() })?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|err| ExecutorError::RequestFailed { message: err.to_string() })?;

    if !status.is_success() {
        return Err(ExecutorError::NonSuccessStatus { status: status.as_u16() });
    }

    Ok(ExecuteOutcome {
        upstream_response: body,
        warnings: prepared.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use querysculptor_model::{FieldNode, OperationType, Path};
    use querysculptor_schema::CachedSchema;

    fn schema_with_query_type() -> CachedSchema {
        CachedSchema::from_sdl(
            "https://example.test/graphql",
            "type Query { pokemons: [Pokemon!]! } type Pokemon { name: String! }".to_string(),
            serde_json::json!({}),
        )
        .unwrap()
    }

    #[test]
    fn prepare_succeeds_for_a_valid_state() {
        let schema = schema_with_query_type();
        let mut state = QueryState::new(OperationType::Query, "Query");
        let mut pokemons = FieldNode::new("pokemons", None);
        pokemons.insert_child(FieldNode::new("name", None)).unwrap();
        state.insert_field(&Path::new(""), pokemons).unwrap();

        let prepared = prepare(&state, &schema).unwrap();
        assert!(prepared.document.contains("pokemons"));
    }

    #[test]
    fn prepare_rejects_a_field_unknown_to_the_schema() {
        let schema = schema_with_query_type();
        let mut state = QueryState::new(OperationType::Query, "Query");
        state.insert_field(&Path::new(""), FieldNode::new("trainers", None)).unwrap();

        let err = prepare(&state, &schema).unwrap_err();
        assert!(matches!(err, ExecutorError::Syntax(_)));
    }
}
