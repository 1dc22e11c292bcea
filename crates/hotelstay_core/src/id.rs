//! Record identity helpers.
//!
//! # Responsibility
//! - Coerce loosely-typed caller ids (form values, query strings) to integers.
//! - Issue booking ids derived from wall-clock milliseconds.
//!
//! # Invariants
//! - Issued booking ids are strictly greater than every id already stored.
//! - Coercion accepts the numeric prefix of a string and nothing else.

use chrono::Utc;
use serde_json::Value;

/// Integer identity shared by rooms and bookings.
pub type RecordId = i64;

/// Millisecond time source used for booking ids.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one instant. Useful for deterministic ids in tests and
/// replay tooling.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Returns the next booking id given the current time and stored ids.
///
/// Two bookings created within the same millisecond still get distinct,
/// increasing ids.
pub fn next_booking_id(now_millis: i64, existing: impl IntoIterator<Item = RecordId>) -> RecordId {
    match existing.into_iter().max() {
        Some(max_id) if max_id >= now_millis => max_id.saturating_add(1),
        _ => now_millis,
    }
}

/// Parses the leading integer of `raw`.
///
/// Leading whitespace and one sign are allowed; parsing stops at the first
/// non-digit. Returns `None` when no digit is found or the value overflows.
pub fn coerce_id(raw: &str) -> Option<RecordId> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: RecordId = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Coerces a JSON value (number or numeric string) to a record id.
///
/// Fractional numbers are truncated toward zero.
pub fn coerce_id_value(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as RecordId)
        }),
        Value::String(text) => coerce_id(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{coerce_id, coerce_id_value, next_booking_id};
    use serde_json::json;

    #[test]
    fn coerce_id_reads_numeric_prefix() {
        assert_eq!(coerce_id("42"), Some(42));
        assert_eq!(coerce_id("  7 "), Some(7));
        assert_eq!(coerce_id("12abc"), Some(12));
        assert_eq!(coerce_id("-3"), Some(-3));
        assert_eq!(coerce_id("+5"), Some(5));
    }

    #[test]
    fn coerce_id_rejects_non_numeric_input() {
        assert_eq!(coerce_id(""), None);
        assert_eq!(coerce_id("abc"), None);
        assert_eq!(coerce_id("-"), None);
        assert_eq!(coerce_id("99999999999999999999999"), None);
    }

    #[test]
    fn coerce_id_value_handles_numbers_and_strings() {
        assert_eq!(coerce_id_value(&json!(2)), Some(2));
        assert_eq!(coerce_id_value(&json!(2.9)), Some(2));
        assert_eq!(coerce_id_value(&json!("3")), Some(3));
        assert_eq!(coerce_id_value(&json!(null)), None);
        assert_eq!(coerce_id_value(&json!([1])), None);
    }

    #[test]
    fn next_booking_id_uses_clock_when_ahead() {
        assert_eq!(next_booking_id(1_000, [10, 20]), 1_000);
        assert_eq!(next_booking_id(1_000, std::iter::empty()), 1_000);
    }

    #[test]
    fn next_booking_id_stays_increasing_when_clock_lags() {
        assert_eq!(next_booking_id(1_000, [1_000]), 1_001);
        assert_eq!(next_booking_id(500, [1_000, 999]), 1_001);
    }
}
