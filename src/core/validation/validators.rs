//! Reusable field validators
//!
//! Custom validators plugged into `#[derive(Validate)]` form payloads with
//! `#[validate(custom(function = "..."))]`.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

/// Validator: semantic version made of three dot-separated numbers (e.g. "1.10.0")
pub fn validate_version(value: &str) -> Result<(), ValidationError> {
    static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = VERSION_REGEX.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());
    if regex.is_match(value.trim()) {
        Ok(())
    } else {
        Err(invalid("version", "must look like MAJOR.MINOR.PATCH (e.g. 1.0.0)"))
    }
}

/// Validator: text must contain something other than whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "is required"))
    } else {
        Ok(())
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}
