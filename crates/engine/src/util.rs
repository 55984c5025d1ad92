//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::{DateTime, NaiveDate, Utc};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, Payer, ResultEngine};

pub(crate) const MAX_DESCRIPTION_CHARS: usize = 200;

/// Parse an ISO-8601 timestamp, or a bare `YYYY-MM-DD` date at midnight UTC.
pub(crate) fn parse_date(value: &str) -> ResultEngine<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
        .ok_or_else(|| EngineError::Validation(format!("invalid date: \"{value}\"")))
}

/// Amounts are finite and strictly positive.
pub(crate) fn validate_amount(amount: f64) -> ResultEngine<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::Validation(
            "amount must be a positive number".to_string(),
        ));
    }
    Ok(amount)
}

/// NFC-normalize the description and enforce the length limit.
pub(crate) fn normalize_description(value: &str) -> ResultEngine<String> {
    let normalized: String = value.nfc().collect();
    if normalized.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(EngineError::Validation(format!(
            "description cannot be longer than {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(normalized)
}

/// Parse a payer stored in the DB into a strongly typed `Payer`.
pub(crate) fn model_payer(value: &str) -> ResultEngine<Payer> {
    Payer::try_from(value)
        .map_err(|_| EngineError::Validation(format!("invalid stored payer: {value}")))
}
