//! Post-parse completeness checks for imported cookies.
//!
//! Validation never aborts a batch: per-record problems accumulate alongside
//! the records that passed, and the import path decides what to do with the
//! partial result. Type mismatches are not reachable here since every parser
//! normalizes its output first.

use serde::Serialize;

use crate::types::CookieRecord;

/// Outcome of validating a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Outcome of validating a parsed batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub valid_cookies: Vec<CookieRecord>,
}

/// Checks that the required fields survived normalization non-empty.
pub fn validate_cookie(cookie: &CookieRecord) -> ValidationResult {
    let mut errors = Vec::new();
    if cookie.name.is_empty() {
        errors.push("missing name field".to_string());
    }
    if cookie.value.is_empty() {
        errors.push("missing value field".to_string());
    }
    if cookie.domain.is_empty() {
        errors.push("missing domain field".to_string());
    }
    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// Validates every record in a batch, keeping the valid ones.
///
/// The batch counts as valid unless a non-empty input produced no usable
/// record at all; individual failures only add to `errors`.
pub fn validate_batch(cookies: &[CookieRecord]) -> BatchValidation {
    let mut errors = Vec::new();
    let mut valid_cookies = Vec::new();

    for (index, cookie) in cookies.iter().enumerate() {
        let result = validate_cookie(cookie);
        if result.valid {
            valid_cookies.push(cookie.clone());
        } else {
            errors.push(format!("cookie {}: {}", index + 1, result.errors.join(", ")));
        }
    }

    let valid = !(valid_cookies.is_empty() && !cookies.is_empty());
    BatchValidation {
        valid,
        errors,
        valid_cookies,
    }
}
