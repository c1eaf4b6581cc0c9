use indexmap::IndexMap;
use querysculptor_model::{FieldNode, FragmentDef, InlineFragment, Path};
use querysculptor_schema::{bare_type_name, CachedSchema};
use querysculptor_validator::{validate_field_alias, validate_field_in_schema, validate_fragment_name};
use serde::Deserialize;
use tracing::instrument;

use crate::context::AppContext;
use crate::error::{ErrorKind, ToolError};
use crate::types::{ToolOutcome, ToolResult};

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadFragmentInput {
    pub session_id: String,
    #[serde(default)]
    pub path: String,
    pub fragment_name: String,
}

/// `spread-fragment`: appends a `...Name` spread at `path`'s selection set.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn spread_fragment(ctx: &AppContext, input: SpreadFragmentInput) -> ToolResult<()> {
    validate_fragment_name(&input.fragment_name)?;

    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;
    state.spread_fragment(&Path::new(input.path), &input.fragment_name)?;
    ctx.save_state(&input.session_id, &state).await?;

    Ok(ToolOutcome::new(()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefineFragmentInput {
    pub session_id: String,
    pub name: String,
    pub on_type: String,
    #[serde(default)]
    pub fields: IndexMap<String, FieldNode>,
}

/// `define-fragment`: defines or replaces a named fragment, validating that
/// `onType` exists on the schema and that every field in its selection
/// exists on the type it is nested under, applied transitively through the
/// fragment's own tree.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn define_fragment(ctx: &AppContext, input: DefineFragmentInput) -> ToolResult<()> {
    validate_fragment_name(&input.name)?;

    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;
    let schema = ctx.schema_for(&state.headers).await?;

    if !schema.has_type(&input.on_type) {
        return Err(ToolError::new(
            ErrorKind::Schema,
            format!("Type '{}' not found on schema.", input.on_type),
        ));
    }
    validate_selection_against_schema(&schema, &input.on_type, &input.fields)?;

    state.fragments.insert(
        input.name,
        FragmentDef {
            on_type: input.on_type,
            fields: input.fields,
        },
    );
    ctx.save_state(&input.session_id, &state).await?;

    Ok(ToolOutcome::new(()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddInlineFragmentInput {
    pub session_id: String,
    #[serde(default)]
    pub path: String,
    pub on_type: String,
}

/// `add-inline-fragment`: appends `... on Type { ... }` at `path`, after
/// checking `onType` exists on the schema.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn add_inline_fragment(ctx: &AppContext, input: AddInlineFragmentInput) -> ToolResult<()> {
    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;
    let schema = ctx.schema_for(&state.headers).await?;

    if !schema.has_type(&input.on_type) {
        return Err(ToolError::new(
            ErrorKind::Schema,
            format!("Type '{}' not found on schema.", input.on_type),
        ));
    }

    state.add_inline_fragment(&Path::new(input.path), InlineFragment::new(input.on_type))?;
    ctx.save_state(&input.session_id, &state).await?;

    Ok(ToolOutcome::new(()))
}

fn validate_selection_against_schema(
    schema: &CachedSchema,
    parent_type: &str,
    fields: &IndexMap<String, FieldNode>,
) -> Result<(), ToolError> {
    for (key, node) in fields {
        if key != node.selection_key() {
            return Err(ToolError::new(
                ErrorKind::Validation,
                format!(
                    "selection map key '{key}' does not match its field's own selection key '{}'",
                    node.selection_key()
                ),
            ));
        }
        validate_field_in_schema(schema, parent_type, &node.field_name)?;
        if let Some(alias) = &node.alias {
            validate_field_alias(alias)?;
        }
        if !node.fields.is_empty() {
            let child_type = schema
                .field(parent_type, &node.field_name)
                .map(|signature| bare_type_name(&signature.type_string))
                .unwrap_or_default();
            validate_selection_against_schema(schema, &child_type, &node.fields)?;
        }
    }
    Ok(())
}
