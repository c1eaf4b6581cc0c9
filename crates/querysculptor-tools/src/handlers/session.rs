use indexmap::IndexMap;
use querysculptor_model::{OperationType, QueryState};
use querysculptor_validator::validate_operation_name;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::context::AppContext;
use crate::error::ToolError;
use crate::types::{ToolOutcome, ToolResult};

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionInput {
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    pub operation_type: OperationType,
    pub operation_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StartSessionOutput {
    pub session_id: String,
    pub operation_type_name: String,
}

/// `start-session`: resolves the root type for `operation_type` against the
/// cached schema, creates an empty `QueryState`, and persists it under a
/// fresh session id.
#[instrument(skip(ctx, input))]
pub async fn start_session(ctx: &AppContext, input: StartSessionInput) -> ToolResult<StartSessionOutput> {
    if let Some(name) = &input.operation_name {
        validate_operation_name(name)?;
    }

    let schema = ctx.schema_for(&input.headers).await?;
    let operation_type_name = schema.root_type_name(input.operation_type).ok_or_else(|| {
        ToolError::new(
            crate::error::ErrorKind::Schema,
            format!(
                "schema has no root type for operation '{}'",
                input.operation_type.as_str()
            ),
        )
    })?;

    let mut state = QueryState::new(input.operation_type, operation_type_name);
    state.headers = input.headers;
    state.operation_name = input.operation_name;

    let session_id = ctx.generate_session_id();
    let _guard = ctx.lock_session(&session_id).await;
    ctx.save_state(&session_id, &state).await?;

    Ok(ToolOutcome::new(StartSessionOutput {
        session_id,
        operation_type_name: state.operation_type_name,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetOperationNameInput {
    pub session_id: String,
    pub name: String,
}

/// `set-operation-name`.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn set_operation_name(ctx: &AppContext, input: SetOperationNameInput) -> ToolResult<()> {
    validate_operation_name(&input.name)?;

    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;
    state.operation_name = Some(input.name);
    ctx.save_state(&input.session_id, &state).await?;

    Ok(ToolOutcome::new(()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndSessionInput {
    pub session_id: String,
}

/// `end-session`: deletes the stored state. Idempotent — ending an already
/// unknown session is not an error.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn end_session(ctx: &AppContext, input: EndSessionInput) -> ToolResult<()> {
    let _guard = ctx.lock_session(&input.session_id).await;
    ctx.session_store.delete(&input.session_id).await.map_err(ToolError::from)?;
    Ok(ToolOutcome::new(()))
}
