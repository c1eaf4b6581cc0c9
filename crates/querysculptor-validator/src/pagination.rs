use crate::coercion::coerce_to_integer;
use crate::error::ValidatorError;

pub const PAGINATION_ARG_NAMES: &[&str] = &["first", "last", "limit", "top", "count"];

const MAX_PAGINATION_VALUE: i64 = 500;

/// Rejects pagination-style arguments (`first`, `last`, `limit`, `top`,
/// `count`) whose numeric value exceeds 500. Non-pagination argument names
/// and non-numeric values are left alone here.
pub fn validate_pagination_value(arg_name: &str, value: &serde_json::Value) -> Result<(), ValidatorError> {
    if !PAGINATION_ARG_NAMES.contains(&arg_name) {
        return Ok(());
    }
    let Some(n) = coerce_to_integer(value) else {
        return Ok(());
    };
    if n > MAX_PAGINATION_VALUE {
        return Err(ValidatorError::PaginationExceeded {
            arg_name: arg_name.to_string(),
            value: n,
        });
    }
    Ok(())
}
