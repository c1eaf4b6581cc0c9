use querysculptor_model::{ArgValue, FieldNode, Path};
use querysculptor_schema::{bare_type_name, CachedSchema};
use querysculptor_validator::{
    coerce_string_value, validate_argument_in_schema, validate_field_alias, validate_field_in_schema,
    validate_input_shape, validate_pagination_value, validate_value_against_type, StringCoercion,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::context::AppContext;
use crate::error::ToolError;
use crate::types::{ToolOutcome, ToolResult};

/// Resolves the GraphQL type name of the selection set at `path`: the root
/// operation type when `path` is empty, otherwise the declared return type
/// of the field already selected there. A segment of the form `"on:TypeName"`
/// hops into an inline fragment's own selection set — the current type
/// becomes `TypeName` directly rather than a field's return type, mirroring
/// `querysculptor_model`'s own path-addressing convention.
fn type_at_path(schema: &CachedSchema, root_type: &str, path: &Path) -> Result<String, ToolError> {
    let mut current_type = root_type.to_string();
    for segment in path.segments() {
        if let Some(on_type) = segment.strip_prefix("on:") {
            current_type = on_type.to_string();
            continue;
        }
        let signature = schema.field(&current_type, segment).ok_or_else(|| {
            ToolError::new(
                crate::error::ErrorKind::Schema,
                format!("path '{path}' does not resolve to a selected field"),
            )
            .with_path(path.to_string())
        })?;
        current_type = bare_type_name(&signature.type_string);
    }
    Ok(current_type)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectFieldInput {
    pub session_id: String,
    #[serde(default)]
    pub parent_path: String,
    pub field_name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectFieldOutput {
    pub selection_key: String,
}

/// `select-field`: validates the field against the parent type, validates
/// the alias if given, and inserts a new `FieldNode`, rejecting a
/// duplicate sibling selection key.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn select_field(ctx: &AppContext, input: SelectFieldInput) -> ToolResult<SelectFieldOutput> {
    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;
    let schema = ctx.schema_for(&state.headers).await?;

    let path = Path::new(input.parent_path);
    let parent_type = type_at_path(&schema, &state.operation_type_name, &path)?;
    validate_field_in_schema(&schema, &parent_type, &input.field_name)?;
    if let Some(alias) = &input.alias {
        validate_field_alias(alias)?;
    }

    let node = FieldNode::new(input.field_name, input.alias);
    let selection_key = node.selection_key().to_string();
    state.insert_field(&path, node)?;

    ctx.save_state(&input.session_id, &state).await?;
    Ok(ToolOutcome::new(SelectFieldOutput { selection_key }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetArgumentInput {
    pub session_id: String,
    pub field_path: String,
    pub arg_name: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub is_variable: bool,
    #[serde(default)]
    pub is_enum: bool,
    #[serde(default)]
    pub is_typed: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SetArgumentOutput {
    pub field_path: String,
    pub arg_name: String,
}

/// `set-argument`: validates the argument exists on the field's schema
/// signature, enforces the pagination cap, checks variable references
/// against `variablesSchema`, and — for `is_typed` — validates the value's
/// shape against the argument's declared type. A bare string value that
/// "looks like" a number or boolean and was set without `is_typed` earns a
/// coercion warning pointing at `set-typed-argument`.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn set_argument(ctx: &AppContext, input: SetArgumentInput) -> ToolResult<SetArgumentOutput> {
    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;
    let schema = ctx.schema_for(&state.headers).await?;

    let path = Path::new(input.field_path.clone());
    let segments = path.segments();
    let field_signature = schema
        .field_at_path(&state.operation_type_name, &segments)
        .ok_or_else(|| {
            ToolError::new(
                crate::error::ErrorKind::Schema,
                format!("path '{}' does not resolve to a selected field", input.field_path),
            )
        })?;
    validate_argument_in_schema(&field_signature, &input.arg_name)?;
    validate_pagination_value(&input.arg_name, &input.value)?;
    validate_input_shape(&input.value, &input.arg_name)?;

    let mut warnings = Vec::new();

    if input.is_variable {
        let var_name = match &input.value {
            serde_json::Value::String(s) => s.trim_start_matches('$').to_string(),
            other => other.to_string(),
        };
        if !state.variables_schema.contains_key(&format!("${var_name}")) {
            return Err(ToolError::new(
                crate::error::ErrorKind::Validation,
                format!("variable '${var_name}' is not declared; call set-variable first"),
            ));
        }
    } else if !input.is_enum && !input.is_typed {
        if let serde_json::Value::String(s) = &input.value {
            if !s.starts_with('$') {
                match coerce_string_value(s) {
                    StringCoercion::String(_) => {}
                    StringCoercion::Int(_, warning)
                    | StringCoercion::Float(_, warning)
                    | StringCoercion::Boolean(_, warning) => warnings.push(warning),
                }
            }
        }
    }

    let type_name = if input.is_typed {
        let arg_type = field_signature
            .arguments
            .iter()
            .find(|a| a.name == input.arg_name)
            .map(|a| a.type_string.clone())
            .ok_or_else(|| {
                ToolError::new(
                    crate::error::ErrorKind::Schema,
                    format!("argument '{}' has no resolvable type", input.arg_name),
                )
            })?;
        validate_value_against_type(&input.value, &arg_type, &input.arg_name)?;
        Some(arg_type)
    } else {
        None
    };

    let arg_value = ArgValue::from_input(input.value, input.is_variable, input.is_enum, input.is_typed, type_name);
    state
        .field_mut(&segments)?
        .args
        .insert(input.arg_name.clone(), arg_value);

    ctx.save_state(&input.session_id, &state).await?;
    Ok(ToolOutcome::with_warnings(
        SetArgumentOutput {
            field_path: input.field_path,
            arg_name: input.arg_name,
        },
        warnings,
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetTypedArgumentInput {
    pub session_id: String,
    pub field_path: String,
    pub arg_name: String,
    pub value: serde_json::Value,
}

/// `set-typed-argument`: the schema resolves the argument's type on the
/// agent's behalf — a thin wrapper over `set-argument` with `is_typed`
/// forced on, so an agent never has to know or guess the type string.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn set_typed_argument(ctx: &AppContext, input: SetTypedArgumentInput) -> ToolResult<SetArgumentOutput> {
    set_argument(
        ctx,
        SetArgumentInput {
            session_id: input.session_id,
            field_path: input.field_path,
            arg_name: input.arg_name,
            value: input.value,
            is_variable: false,
            is_enum: false,
            is_typed: true,
        },
    )
    .await
}
