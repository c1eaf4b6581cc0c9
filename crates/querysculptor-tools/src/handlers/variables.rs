use querysculptor_validator::{
    validate_graphql_type, validate_input_shape, validate_value_against_type, validate_variable_name,
    validate_variable_type,
};
use serde::Deserialize;
use tracing::instrument;

use crate::context::AppContext;
use crate::error::ToolError;
use crate::types::{ToolOutcome, ToolResult};

#[derive(Debug, Clone, Deserialize)]
pub struct SetVariableInput {
    pub session_id: String,
    pub var_name: String,
    #[serde(rename = "type")]
    pub type_string: String,
    pub default: Option<serde_json::Value>,
}

/// `set-variable`: validates the `$`-prefixed name, the type string
/// (including its depth-5 list-nesting cap), and — if a default is given —
/// that it is shape-compatible with the declared type.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn set_variable(ctx: &AppContext, input: SetVariableInput) -> ToolResult<()> {
    validate_variable_name(&input.var_name)?;
    validate_variable_type(&input.type_string)?;
    validate_graphql_type(&input.type_string)?;
    if let Some(default) = &input.default {
        validate_value_against_type(default, &input.type_string, &input.var_name)?;
        validate_input_shape(default, &input.var_name)?;
    }

    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;

    state.variables_schema.insert(input.var_name.clone(), input.type_string);
    if let Some(default) = input.default {
        state.variables_defaults.insert(input.var_name, default);
    } else {
        state.variables_defaults.shift_remove(&input.var_name);
    }

    ctx.save_state(&input.session_id, &state).await?;
    Ok(ToolOutcome::new(()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetVariableValueInput {
    pub session_id: String,
    pub var_name: String,
    pub value: serde_json::Value,
}

/// `set-variable-value`: rejects a value for a variable that was never
/// declared with `set-variable`, and rejects one whose shape doesn't match
/// the declared type.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn set_variable_value(ctx: &AppContext, input: SetVariableValueInput) -> ToolResult<()> {
    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;

    let Some(type_string) = state.variables_schema.get(&input.var_name).cloned() else {
        return Err(ToolError::new(
            crate::error::ErrorKind::Validation,
            format!("unknown variable '{}' — call set-variable first", input.var_name),
        ));
    };
    validate_value_against_type(&input.value, &type_string, &input.var_name)?;
    validate_input_shape(&input.value, &input.var_name)?;

    state.variables_values.insert(input.var_name, input.value);
    ctx.save_state(&input.session_id, &state).await?;
    Ok(ToolOutcome::new(()))
}
