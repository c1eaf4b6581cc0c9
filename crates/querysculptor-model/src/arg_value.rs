use serde::{Deserialize, Serialize};

/// A single argument (or directive-argument) value.
///
/// This is the tagged sum type described by the design notes: a value
/// carries exactly one of a variable reference, an enum member, a
/// schema-typed literal, a generically-serialized literal, or pre-quoted
/// text. The last variant replaces the `__graphqlString` marker-object hack
/// some JavaScript implementations use to suppress double-quoting — here
/// it is its own variant instead of a magic key on an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ArgValue {
    /// `$name` — a reference to a declared variable.
    Variable { name: String },
    /// A bare enum member, printed verbatim with no quotes.
    Enum { symbol: String },
    /// A value whose GraphQL type was resolved against the schema when it
    /// was set (`set-typed-argument`). `type_name` is kept for diagnostics
    /// and is not itself re-validated at render time.
    Typed {
        value: serde_json::Value,
        type_name: String,
    },
    /// A value with no schema-resolved type; serialized with the generic
    /// GraphQL-value printing rules.
    Raw { value: serde_json::Value },
    /// Literal text to splice into the document unchanged — used when a
    /// value has already been rendered and must not be re-quoted.
    PreQuoted { text: String },
}

impl ArgValue {
    /// Recognizes the `"$name"` shorthand and normalizes it into a
    /// [`ArgValue::Variable`]. Any other JSON value is wrapped according to
    /// whether it was explicitly typed.
    pub fn from_input(
        value: serde_json::Value,
        is_variable: bool,
        is_enum: bool,
        is_typed: bool,
        type_name: Option<String>,
    ) -> ArgValue {
        if is_variable {
            let name = match &value {
                serde_json::Value::String(s) => s.trim_start_matches('$').to_string(),
                other => other.to_string(),
            };
            return ArgValue::Variable { name };
        }
        if is_enum {
            let symbol = match &value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return ArgValue::Enum { symbol };
        }
        if let serde_json::Value::String(s) = &value {
            if let Some(name) = s.strip_prefix('$') {
                return ArgValue::Variable {
                    name: name.to_string(),
                };
            }
        }
        if is_typed {
            ArgValue::Typed {
                value,
                type_name: type_name.unwrap_or_default(),
            }
        } else {
            ArgValue::Raw { value }
        }
    }

    /// The variable name this value references, if any (without the
    /// leading `$`).
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            ArgValue::Variable { name } => Some(name.trim_start_matches('$')),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shorthand_dollar_string_becomes_variable() {
        let v = ArgValue::from_input(json!("$n"), false, false, false, None);
        assert_eq!(v.variable_name(), Some("n"));
    }

    #[test]
    fn typed_value_keeps_type_name() {
        let v = ArgValue::from_input(json!(10), false, false, true, Some("Int".into()));
        match v {
            ArgValue::Typed { type_name, .. } => assert_eq!(type_name, "Int"),
            _ => panic!("expected Typed"),
        }
    }
}
