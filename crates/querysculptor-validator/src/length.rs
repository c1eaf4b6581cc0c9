use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidatorError;

pub(crate) const MAX_STRING_LENGTH: usize = 8192;

static CONTROL_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0000}-\u{001F}\u{007F}-\u{009F}]").expect("static pattern is valid"));

pub fn validate_string_length(value: &str, name: &str) -> Result<(), ValidatorError> {
    if value.chars().count() > MAX_STRING_LENGTH {
        return Err(ValidatorError::StringTooLong {
            name: name.to_string(),
            length: value.chars().count(),
        });
    }
    Ok(())
}

pub fn validate_no_control_characters(value: &str, name: &str) -> Result<(), ValidatorError> {
    if CONTROL_CHARACTERS.is_match(value) {
        return Err(ValidatorError::ControlCharacters {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_strings_over_the_cap() {
        let s = "a".repeat(8193);
        assert!(validate_string_length(&s, "value").is_err());
    }

    #[test]
    fn accepts_strings_at_the_cap() {
        let s = "a".repeat(8192);
        assert!(validate_string_length(&s, "value").is_ok());
    }

    #[test]
    fn rejects_c0_control_characters() {
        assert!(validate_no_control_characters("a\u{0007}b", "value").is_err());
    }

    #[test]
    fn rejects_c1_control_characters() {
        assert!(validate_no_control_characters("a\u{0085}b", "value").is_err());
    }

    #[test]
    fn accepts_ordinary_text() {
        assert!(validate_no_control_characters("hello world", "value").is_ok());
    }

    #[test]
    fn rejects_newlines_per_the_literal_c0_range() {
        assert!(validate_no_control_characters("hello\nworld", "value").is_err());
    }
}
