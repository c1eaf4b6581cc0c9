use querysculptor_builder::render_query_state;
use querysculptor_executor::{execute, prepare, EXECUTE_TIMEOUT};
use querysculptor_validator::validate_required_arguments;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::context::AppContext;
use crate::types::{ToolOutcome, ToolResult};

#[derive(Debug, Clone, Deserialize)]
pub struct BuildQueryInput {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BuildQueryOutput {
    pub document: String,
}

/// `build-query`: renders the current state, with no schema validation or
/// complexity analysis — the fast, always-available preview.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn build_query(ctx: &AppContext, input: BuildQueryInput) -> ToolResult<BuildQueryOutput> {
    let state = ctx.load_state(&input.session_id).await?;
    let document = render_query_state(&state);
    Ok(ToolOutcome::new(BuildQueryOutput { document }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateQueryInput {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidateQueryOutput {
    pub document: String,
}

/// `validate-query`: render, parse, validate against the cached schema, and
/// run the complexity analyzer, without making an outbound request.
/// Missing-required-argument and approaching-a-limit notices come back as
/// warnings; anything that fails outright comes back as a `ToolError`.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn validate_query(ctx: &AppContext, input: ValidateQueryInput) -> ToolResult<ValidateQueryOutput> {
    let state = ctx.load_state(&input.session_id).await?;
    let schema = ctx.schema_for(&state.headers).await?;

    let prepared = prepare(&state, &schema)?;
    let mut warnings = prepared.warnings;
    warnings.extend(validate_required_arguments(
        &schema,
        &state.operation_type_name,
        &state.query_structure,
    ));

    Ok(ToolOutcome::with_warnings(
        ValidateQueryOutput {
            document: prepared.document,
        },
        warnings,
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteQueryInput {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExecuteQueryOutput {
    pub document: String,
    pub upstream_response: serde_json::Value,
}

/// `execute-query`: validates then POSTs to the single configured upstream
/// endpoint with the 60-second execute-path timeout, returning the
/// upstream's JSON response verbatim.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn execute_query(ctx: &AppContext, input: ExecuteQueryInput) -> ToolResult<ExecuteQueryOutput> {
    let state = ctx.load_state(&input.session_id).await?;
    let schema = ctx.schema_for(&state.headers).await?;

    let env_headers = ctx
        .config
        .env_headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let outcome = execute(
        &ctx.http,
        &ctx.config.graphql_endpoint,
        &env_headers,
        &state,
        &schema,
        EXECUTE_TIMEOUT,
    )
    .await?;

    let document = render_query_state(&state);
    Ok(ToolOutcome::with_warnings(
        ExecuteQueryOutput {
            document,
            upstream_response: outcome.upstream_response,
        },
        outcome.warnings,
    ))
}
