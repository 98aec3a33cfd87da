//! Scalar type inference for raw XML strings
//!
//! Attempts run in a fixed order and the first match wins:
//!
//! 1. exactly `true` or `false` -> boolean
//! 2. optional sign followed by ASCII digits -> integer
//! 3. a finite decimal or exponent number -> float
//! 4. anything else -> the string, unchanged

use crate::document::TypedValue;

/// Infer a typed value from a raw string
pub fn infer_value(raw: &str) -> TypedValue {
    match raw {
        "true" => return TypedValue::Boolean(true),
        "false" => return TypedValue::Boolean(false),
        _ => {}
    }

    if is_integer_literal(raw) {
        // Out of i64 range: a float would silently drop digits
        return match raw.parse::<i64>() {
            Ok(value) => TypedValue::Integer(value),
            Err(_) => TypedValue::String(raw.to_string()),
        };
    }

    if let Some(value) = parse_float(raw) {
        return TypedValue::Float(value);
    }

    TypedValue::String(raw.to_string())
}

/// Infer a typed value, or keep the raw string when inference is disabled
pub fn convert_value(raw: &str, infer_types: bool) -> TypedValue {
    if infer_types {
        infer_value(raw)
    } else {
        TypedValue::String(raw.to_string())
    }
}

/// Optional single sign followed by one or more ASCII digits
pub(crate) fn is_integer_literal(raw: &str) -> bool {
    let digits = raw
        .strip_prefix('+')
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_float(raw: &str) -> Option<f64> {
    // Rejects "inf" and "nan" spellings, which carry no digit
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}
