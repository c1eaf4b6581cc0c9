use querysculptor_model::{ArgValue, Directive, Path};
use querysculptor_validator::is_valid_graphql_name;
use serde::Deserialize;
use tracing::instrument;

use crate::context::AppContext;
use crate::error::{ErrorKind, ToolError};
use crate::types::{ToolOutcome, ToolResult};

const OPERATION_SENTINEL: &str = "operation";

#[derive(Debug, Clone, Deserialize)]
pub struct DirectiveArgumentInput {
    pub name: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub is_variable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddDirectiveInput {
    pub session_id: String,
    /// Either the literal string `"operation"`, or a dotted selection-key
    /// path to the field the directive attaches to.
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<DirectiveArgumentInput>,
}

/// `add-directive`: inserts a `@name(arg: val, ...)` either onto the
/// operation itself (`path == "operation"`) or onto the field addressed by
/// `path`.
#[instrument(skip(ctx, input), fields(session_id = %input.session_id))]
pub async fn add_directive(ctx: &AppContext, input: AddDirectiveInput) -> ToolResult<()> {
    if !is_valid_graphql_name(&input.name) {
        return Err(ToolError::new(
            ErrorKind::Validation,
            format!("'{}' is not a valid GraphQL name for directive name", input.name),
        ));
    }
    for arg in &input.arguments {
        if !is_valid_graphql_name(&arg.name) {
            return Err(ToolError::new(
                ErrorKind::Validation,
                format!("'{}' is not a valid GraphQL name for directive argument name", arg.name),
            ));
        }
    }

    let mut directive = Directive::new(input.name);
    for arg in input.arguments {
        directive.arg(arg.name, ArgValue::from_input(arg.value, arg.is_variable, false, false, None));
    }

    let _guard = ctx.lock_session(&input.session_id).await;
    let mut state = ctx.load_state(&input.session_id).await?;

    let target = if input.path == OPERATION_SENTINEL {
        None
    } else {
        Some(Path::new(input.path))
    };
    state.add_directive(target.as_ref(), directive)?;

    ctx.save_state(&input.session_id, &state).await?;
    Ok(ToolOutcome::new(()))
}
