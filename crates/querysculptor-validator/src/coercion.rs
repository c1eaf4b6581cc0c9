use serde_json::Value;

/// Accepts integer JSON numbers, or strings whose base-10 `parse::<i64>()`
/// round-trips exactly back to the original string (so `"007"`, `"+5"`,
/// and `" 5"` are all rejected even though they'd parse). Booleans are
/// never coerced, even though `serde_json` would happily treat `true` as
/// non-numeric-but-truthy in other contexts.
pub fn coerce_to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(_) => None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
            }
        }
        Value::String(s) => s.parse::<i64>().ok().filter(|i| i.to_string() == *s),
        _ => None,
    }
}

/// Accepts finite JSON numbers or numeric strings parseable as `f64`.
pub fn coerce_to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(_) => None,
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Accepts booleans, or the case-insensitive strings `"true"`/`"false"`.
/// Numbers are never coerced (unlike many loose-typed languages, `1` is not
/// `true` here).
pub fn coerce_to_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// What a bare string value opportunistically looks like, and the warning
/// to surface if the caller used `set-argument` instead of
/// `set-typed-argument` for it.
#[derive(Debug, Clone, PartialEq)]
pub enum StringCoercion {
    Int(i64, String),
    Float(f64, String),
    Boolean(bool, String),
    String(String),
}

/// Opportunistically detects whether a bare string argument value "looks
/// like" an Int, Float, or Boolean, in that priority order. `"42"` is
/// reported as `Int` — it also happens to parse as a float equal to the
/// same value, but the Int check runs first and short-circuits, so no
/// separate Float warning is produced for it.
pub fn coerce_string_value(s: &str) -> StringCoercion {
    let as_value = Value::String(s.to_string());
    if let Some(i) = coerce_to_integer(&as_value) {
        return StringCoercion::Int(
            i,
            format!(
                "Value '{s}' looks like an integer. Consider using set-typed-argument for unambiguous Int type handling."
            ),
        );
    }
    if let Some(f) = coerce_to_float(&as_value) {
        return StringCoercion::Float(
            f,
            format!(
                "Value '{s}' looks like a float. Consider using set-typed-argument for unambiguous Float type handling."
            ),
        );
    }
    if let Some(b) = coerce_to_boolean(&as_value) {
        return StringCoercion::Boolean(
            b,
            format!(
                "Value '{s}' looks like a boolean. Consider using set-typed-argument for unambiguous Boolean type handling."
            ),
        );
    }
    StringCoercion::String(s.to_string())
}
