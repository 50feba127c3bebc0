//! Small free functions shared by several keywords. Grounded in the
//! teacher's `helpers.rs::equal`: structural equality that treats numbers by
//! their `f64` value rather than by their `serde_json::Number` representation,
//! so `1` and `1.0` compare equal under `enum`/`const`/`uniqueItems`.
use serde_json::Value;

pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).map_or(false, |other| equal(value, other)))
        }
        _ => left == right,
    }
}
