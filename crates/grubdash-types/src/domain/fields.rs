//! Checks shared by dish and order inputs. Request fields arrive as raw JSON
//! values, so type mismatches are validation failures rather than decode
//! failures.

use serde_json::Value;

/// A text field is present only when it holds a non-empty string.
pub(crate) fn non_empty_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    }
}

/// Whole numbers above zero. `10.0` counts as an integer, `"10"` does not.
pub(crate) fn positive_integer(value: Option<Value>) -> Option<i64> {
    let Value::Number(number) = value? else {
        return None;
    };
    let int = match number.as_i64() {
        Some(int) => int,
        None => {
            let float = number.as_f64()?;
            if float.fract() != 0.0 || float >= i64::MAX as f64 {
                return None;
            }
            float as i64
        }
    };
    (int > 0).then_some(int)
}

/// Returns the body `id` when it conflicts with `route_id`.
///
/// Null, `""`, `false` and `0` are treated as absent. Any other non-string
/// id conflicts even when its JSON text equals the route id, so `17` never
/// matches the route segment `"17"`.
pub(crate) fn conflicting_id(value: Option<Value>, route_id: &str) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() || text == route_id => None,
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
