//! Form payload validation
//!
//! Forms derive `validator::Validate`; the data-access layer validates every
//! payload before building a request, so an invalid form never reaches the
//! backend.

pub mod validators;

pub use validators::{validate_not_blank, validate_version};

use validator::ValidationErrors;

/// Render validation errors as one operator-facing line, fields in name order
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{} {}", field, reasons.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
