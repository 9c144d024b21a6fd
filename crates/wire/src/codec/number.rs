//! Decimal text form of numbers
//!
//! The canonical wire form of a number is its decimal text with no exponent.
//! Integral values carry no fractional part, so `Float(23.0)` and `Int(23)`
//! share the wire form `"23"`. Parsing collapses such values back to `Int`.

use super::decode::DecodeError;
use tagwire_core::Value;

/// Format an integer
pub fn format_int(i: i64) -> String {
    i.to_string()
}

/// Format a float as the shortest decimal text that parses back to it
///
/// Returns `None` for NaN and the infinities, which have no decimal form.
pub fn format_float(f: f64) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    // Display never uses exponent notation and prints integral values bare
    let text = f.to_string();
    if text == "-0" {
        Some("0".to_string())
    } else {
        Some(text)
    }
}

/// Parse decimal text into `Int` or `Float`
///
/// Text that looks fractional (`.`, `e`, `E`) is parsed as a float first and
/// collapses to `Int` when the result is integral and fits in `i64`. Other text
/// is parsed as an integer, falling back to a float when it is out of range.
pub fn parse_number(text: &str) -> Result<Value, DecodeError> {
    let invalid = || DecodeError::InvalidNumber(text.to_string());

    if text.contains(['.', 'e', 'E']) {
        let f: f64 = text.parse().map_err(|_| invalid())?;
        if !f.is_finite() {
            return Err(invalid());
        }
        return Ok(collapse_integral(f));
    }

    match text.parse::<i64>() {
        Ok(i) => Ok(Value::Int(i)),
        Err(_) => {
            // Out-of-range integers; also keeps "inf"/"NaN" spellings out
            let f: f64 = text.parse().map_err(|_| invalid())?;
            if f.is_finite() && f.fract() == 0.0 {
                Ok(Value::Float(f))
            } else {
                Err(invalid())
            }
        }
    }
}

fn collapse_integral(f: f64) -> Value {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && f >= -UPPER && f < UPPER {
        Value::Int(f as i64)
    } else {
        Value::Float(f)
    }
}
