//! Field extraction and validation for survey submissions

use crate::error::SubmissionError;
use crate::fields;
use crate::form::{RawForm, ValidatedSubmission};
use crate::Result;

/// Parse an age field into an integer
///
/// Surrounding whitespace is ignored. Any base-10 `i64` is accepted,
/// including negative values.
pub fn parse_age(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::EmptyField { field: fields::AGE });
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| SubmissionError::NotANumber {
            field: fields::AGE,
            value: trimmed.to_string(),
        })
}

/// Turns a [`RawForm`] into a [`ValidatedSubmission`]
///
/// Stateless; a single instance can be shared by every request handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a decoded form
    ///
    /// Missing text fields become empty strings and a missing
    /// `improvements` field becomes an empty list. Only the age can fail.
    pub fn validate(&self, raw: &RawForm) -> Result<ValidatedSubmission> {
        let age = parse_age(raw.get(fields::AGE).unwrap_or_default())?;

        Ok(ValidatedSubmission {
            name: text(raw, fields::NAME),
            email: text(raw, fields::EMAIL),
            age,
            role: text(raw, fields::ROLE),
            recommend: text(raw, fields::RECOMMEND),
            improvements: raw.get_all(fields::IMPROVEMENTS).to_vec(),
            comments: text(raw, fields::COMMENTS),
        })
    }
}

fn text(raw: &RawForm, name: &str) -> String {
    raw.get(name).unwrap_or_default().to_string()
}
