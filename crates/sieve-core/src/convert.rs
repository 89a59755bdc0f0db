//! Primitive converters
//!
//! Each `to_*` function coerces a [`Value`] into a primitive and reports a
//! [`FilterError::Conversion`] when it cannot. The `must_*` variants swallow
//! the error and return the type's zero value instead.

use crate::error::FilterError;
use crate::value::Value;

type Result<T> = std::result::Result<T, FilterError>;

// 2^63 and 2^64; both are exact as f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

fn unsupported(value: &Value, target: &'static str) -> FilterError {
    FilterError::conversion(
        value,
        target,
        format!("unsupported type {}", value.type_name()),
    )
}

/// Convert a value to a signed integer.
///
/// Floats are truncated toward zero; strings are trimmed before parsing.
pub fn to_int(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Uint(u) => {
            i64::try_from(*u).map_err(|_| FilterError::conversion(u, "int", "out of range"))
        }
        Value::Float(x) => {
            let t = x.trunc();
            if t.is_finite() && (-I64_BOUND..I64_BOUND).contains(&t) {
                Ok(t as i64)
            } else {
                Err(FilterError::conversion(x, "int", "out of range"))
            }
        }
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| FilterError::conversion(s, "int", e.to_string())),
        _ => Err(unsupported(value, "int")),
    }
}

/// Convert a value to a 64-bit signed integer. Same as [`to_int`].
pub fn to_int64(value: &Value) -> Result<i64> {
    to_int(value)
}

/// Convert a value to an unsigned integer. Negative inputs are rejected.
pub fn to_uint(value: &Value) -> Result<u64> {
    match value {
        Value::Int(i) => {
            u64::try_from(*i).map_err(|_| FilterError::conversion(i, "uint", "negative value"))
        }
        Value::Uint(u) => Ok(*u),
        Value::Float(x) if *x < 0.0 => Err(FilterError::conversion(x, "uint", "negative value")),
        Value::Float(x) => {
            let t = x.trunc();
            if t.is_finite() && t < U64_BOUND {
                Ok(t as u64)
            } else {
                Err(FilterError::conversion(x, "uint", "out of range"))
            }
        }
        Value::Str(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| FilterError::conversion(s, "uint", e.to_string())),
        _ => Err(unsupported(value, "uint")),
    }
}

/// Convert a value to a float
pub fn to_float(value: &Value) -> Result<f64> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Uint(u) => Ok(*u as f64),
        Value::Float(x) => Ok(*x),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| FilterError::conversion(s, "float", e.to_string())),
        _ => Err(unsupported(value, "float")),
    }
}

/// Parse a boolean word, case-insensitively.
///
/// `1`, `on`, `yes`, `true` are true; `0`, `off`, `no`, `false` are false.
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "1" | "on" | "yes" | "true" => Ok(true),
        "0" | "off" | "no" | "false" => Ok(false),
        _ => Err(FilterError::conversion(
            format!("'{s}'"),
            "bool",
            "expected one of 1, on, yes, true, 0, off, no, false",
        )),
    }
}

/// Convert a value to a boolean
pub fn to_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Str(s) => parse_bool(s),
        Value::Int(_) | Value::Uint(_) => parse_bool(&value.to_string()),
        _ => Err(unsupported(value, "bool")),
    }
}

/// Render a scalar value as a string
pub fn to_string(value: &Value) -> Result<String> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Int(_) | Value::Uint(_) | Value::Float(_) | Value::Time(_) => {
            Ok(value.to_string())
        }
        _ => Err(unsupported(value, "string")),
    }
}

/// [`to_int`], or `0` on failure
pub fn must_int(value: &Value) -> i64 {
    to_int(value).unwrap_or_default()
}

/// [`to_int64`], or `0` on failure
pub fn must_int64(value: &Value) -> i64 {
    to_int64(value).unwrap_or_default()
}

/// [`to_uint`], or `0` on failure
pub fn must_uint(value: &Value) -> u64 {
    to_uint(value).unwrap_or_default()
}

/// [`to_float`], or `0.0` on failure
pub fn must_float(value: &Value) -> f64 {
    to_float(value).unwrap_or_default()
}

/// [`to_bool`] on the trimmed value, or `false` on failure
pub fn must_bool(value: &Value) -> bool {
    match value {
        Value::Str(s) => parse_bool(s.trim()).unwrap_or_default(),
        _ => to_bool(value).unwrap_or_default(),
    }
}

/// [`to_string`], or an empty string on failure
pub fn must_string(value: &Value) -> String {
    to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from("2"), 2)]
    #[case(Value::from(" -2 "), -2)]
    #[case(Value::Int(7), 7)]
    #[case(Value::Uint(7), 7)]
    #[case(Value::Float(3.9), 3)]
    #[case(Value::Float(-3.9), -3)]
    #[case(Value::from(8u8), 8)]
    fn test_to_int(#[case] input: Value, #[case] want: i64) {
        assert_eq!(to_int(&input).unwrap(), want);
        assert_eq!(to_int64(&input).unwrap(), want);
    }

    #[rstest]
    #[case(Value::from("2a"))]
    #[case(Value::Bool(true))]
    #[case(Value::StrList(vec![]))]
    #[case(Value::Uint(u64::MAX))]
    #[case(Value::Float(f64::NAN))]
    #[case(Value::Float(f64::INFINITY))]
    #[case(Value::Float(1e30))]
    #[case(Value::Float(-1e30))]
    fn test_to_int_fails(#[case] input: Value) {
        assert!(matches!(
            to_int(&input),
            Err(FilterError::Conversion { target: "int", .. })
        ));
        assert_eq!(must_int(&input), 0);
    }

    #[test]
    fn test_to_uint() {
        assert_eq!(to_uint(&Value::from("2")).unwrap(), 2);
        assert_eq!(to_uint(&Value::Float(2.7)).unwrap(), 2);
        assert!(to_uint(&Value::from("-2")).is_err());
        assert!(to_uint(&Value::Int(-2)).is_err());
        assert_eq!(must_uint(&Value::from("-2")), 0);
        assert_eq!(must_uint(&Value::from("2a")), 0);
    }

    #[test]
    fn test_to_uint_rejects_unrepresentable_floats() {
        for x in [f64::NAN, f64::INFINITY, 1e30] {
            assert!(matches!(
                to_uint(&Value::Float(x)),
                Err(FilterError::Conversion { target: "uint", .. })
            ));
        }
        assert_eq!(to_uint(&Value::Float(1e18)).unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&Value::from("123.5")).unwrap(), 123.5);
        assert_eq!(to_float(&Value::from("-123.5")).unwrap(), -123.5);
        assert_eq!(to_float(&Value::Int(2)).unwrap(), 2.0);
        assert_eq!(must_float(&Value::from("invalid")), 0.0);
    }

    #[rstest]
    #[case("1", true)]
    #[case("on", true)]
    #[case("YES", true)]
    #[case("True", true)]
    #[case("0", false)]
    #[case("off", false)]
    #[case("No", false)]
    #[case("false", false)]
    fn test_parse_bool(#[case] input: &str, #[case] want: bool) {
        assert_eq!(parse_bool(input).unwrap(), want);
        assert_eq!(must_bool(&Value::from(input)), want);
    }

    #[test]
    fn test_parse_bool_names_offending_string() {
        let err = parse_bool("10").unwrap_err();
        assert!(err.to_string().contains("'10'"));
        assert!(!must_bool(&Value::from("10")));
        assert!(must_bool(&Value::from(" yes ")));
    }

    #[test]
    fn test_to_bool_from_values() {
        assert!(to_bool(&Value::Bool(true)).unwrap());
        assert!(to_bool(&Value::Int(1)).unwrap());
        assert!(to_bool(&Value::Float(1.0)).is_err());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&Value::Int(50)).unwrap(), "50");
        assert_eq!(to_string(&Value::Bool(false)).unwrap(), "false");
        assert_eq!(to_string(&Value::from("abc")).unwrap(), "abc");
        assert!(to_string(&Value::IntList(vec![1])).is_err());
        assert_eq!(must_string(&Value::Null), "");
    }
}
