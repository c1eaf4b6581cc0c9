use crate::error::ToolError;

/// Every successful tool handler returns one of these: the operation's own
/// output payload, plus any non-fatal warnings accumulated along the way
/// (coercion hints, approaching-a-limit notices, missing-required-argument
/// notices). A failed handler returns `Err(ToolError)` instead — warnings
/// and a terminal error are mutually exclusive for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome<T> {
    pub result: T,
    pub warnings: Vec<String>,
}

impl<T> ToolOutcome<T> {
    pub fn new(result: T) -> Self {
        Self {
            result,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(result: T, warnings: Vec<String>) -> Self {
        Self { result, warnings }
    }
}

/// Every tool handler returns this: either an output payload plus warnings,
/// or a `ToolError` carrying the error-kind taxonomy. An MCP adapter (out
/// of scope for this crate) flattens this into its own wire-level
/// `{ ok, result?, errors?, warnings? }` envelope.
pub type ToolResult<T> = Result<ToolOutcome<T>, ToolError>;
