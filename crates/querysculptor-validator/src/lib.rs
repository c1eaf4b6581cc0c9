//! Validation, coercion, and serialization rules for QuerySculptor's tool
//! arguments, independent of any particular schema library where possible
//! (see `schema_aware` for the handful of checks that do need one).

mod coercion;
mod error;
mod input_complexity;
mod length;
mod names;
mod pagination;
mod schema_aware;
mod suggest;
mod syntax;
mod types;
mod value;

pub use coercion::{coerce_string_value, coerce_to_boolean, coerce_to_float, coerce_to_integer, StringCoercion};
pub use error::ValidatorError;
pub use input_complexity::validate_input_shape;
pub use length::{validate_no_control_characters, validate_string_length};
pub use names::{
    is_valid_graphql_name, validate_field_alias, validate_fragment_name, validate_operation_name,
    validate_variable_name,
};
pub use pagination::{validate_pagination_value, PAGINATION_ARG_NAMES};
pub use schema_aware::{
    get_argument_type, validate_argument_in_schema, validate_field_in_schema, validate_required_arguments,
};
pub use suggest::{did_you_mean_suffix, nearest_name};
pub use syntax::{validate_against_schema, validate_query_syntax};
pub use types::{validate_graphql_type, validate_variable_type};
pub use value::{serialize_graphql_value, validate_value_against_type};
