//! One module per group of tool operations, each a thin
//! `(ctx, input) -> ToolResult<Output>` function with no knowledge of
//! whatever transport hands it a deserialized input.

pub mod directives;
pub mod fields;
pub mod fragments;
pub mod query;
pub mod session;
pub mod variables;

pub use directives::{add_directive, AddDirectiveInput, DirectiveArgumentInput};
pub use fields::{
    select_field, set_argument, set_typed_argument, SelectFieldInput, SelectFieldOutput, SetArgumentInput,
    SetArgumentOutput, SetTypedArgumentInput,
};
pub use fragments::{
    add_inline_fragment, define_fragment, spread_fragment, AddInlineFragmentInput, DefineFragmentInput,
    SpreadFragmentInput,
};
pub use query::{
    build_query, execute_query, validate_query, BuildQueryInput, BuildQueryOutput, ExecuteQueryInput,
    ExecuteQueryOutput, ValidateQueryInput, ValidateQueryOutput,
};
pub use session::{
    end_session, set_operation_name, start_session, EndSessionInput, SetOperationNameInput, StartSessionInput,
    StartSessionOutput,
};
pub use variables::{set_variable, set_variable_value, SetVariableInput, SetVariableValueInput};
