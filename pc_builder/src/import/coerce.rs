//! Lenient cell coercion for imported spreadsheet values.

use serde_json::{Number, Value};

use crate::parts::scalar_text;

/// Parse a numeric-looking string (`"65"`, `" 2.5 "`, `"1 299,90"`).
///
/// Inner spaces are dropped and a lone decimal comma is read as a point.
pub fn parse_number(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if compact.is_empty() {
        return None;
    }
    let candidate = if compact.contains(',') && !compact.contains('.') && compact.matches(',').count() == 1 {
        compact.replace(',', ".")
    } else {
        compact
    };
    candidate.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// JSON number, kept integral when the value has no fractional part.
pub fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        Value::Number(Number::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Coerce a cell bound for the attribute bag.
///
/// - string with a comma: list of trimmed, non-empty strings
/// - numeric-looking string: number
/// - other string: trimmed string
/// - anything else passes through
pub fn attribute_value(v: &Value) -> Value {
    let Value::String(s) = v else {
        return v.clone();
    };
    let s = s.trim();
    if s.contains(',') {
        return Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        );
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => number_value(f),
        _ => Value::String(s.to_string()),
    }
}

/// Price from a cell; absent, unparsable or negative gives `0.0`.
pub fn price(v: Option<&Value>) -> f64 {
    let f = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_number(s),
        _ => None,
    };
    f.filter(|f| *f > 0.0).unwrap_or(0.0)
}

/// Stock from a cell; absent, unparsable or negative gives `0`. Truncates fractions.
pub fn stock(v: Option<&Value>) -> u32 {
    let f = price(v);
    if f >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        f.trunc() as u32
    }
}

/// Trimmed text of a scalar cell.
pub fn text(v: Option<&Value>) -> Option<String> {
    v.and_then(scalar_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
