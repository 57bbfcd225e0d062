//! Conversions to and from `serde_json::Value`.

use serde_json::Value as SerdeValue;

use crate::value::Value;

/// 2^63. Integral `f64`s in `[-2^63, 2^63)` fit an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
/// 2^64. Integral `f64`s in `[0, 2^64)` fit a `u64`.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

impl From<SerdeValue> for Value {
    fn from(v: SerdeValue) -> Self {
        match v {
            SerdeValue::Null => Value::Null,
            SerdeValue::Bool(b) => Value::Bool(b),
            SerdeValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            SerdeValue::String(s) => Value::String(s),
            SerdeValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            SerdeValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Integral numbers in `i64` or `u64` range become `serde_json` integers;
/// negative zero stays a float. NaN and infinities become `null`.
impl From<Value> for SerdeValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => SerdeValue::Null,
            Value::Bool(b) => SerdeValue::Bool(b),
            Value::Number(n) => number_to_serde(n),
            Value::String(s) => SerdeValue::String(s),
            Value::Array(items) => {
                SerdeValue::Array(items.into_iter().map(SerdeValue::from).collect())
            }
            Value::Object(map) => SerdeValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, SerdeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number_to_serde(n: f64) -> SerdeValue {
    let integral = n.fract() == 0.0 && !(n == 0.0 && n.is_sign_negative());
    if integral && (-I64_BOUND..I64_BOUND).contains(&n) {
        SerdeValue::from(n as i64)
    } else if integral && (0.0..U64_BOUND).contains(&n) {
        SerdeValue::from(n as u64)
    } else {
        serde_json::Number::from_f64(n).map_or(SerdeValue::Null, SerdeValue::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_serde_json() {
        let v = Value::from(json!({"a": [1, 2.5, "x", null, true]}));
        let expected = Value::object_from([(
            "a",
            Value::from(vec![
                Value::Number(1.0),
                Value::Number(2.5),
                Value::from("x"),
                Value::Null,
                Value::Bool(true),
            ]),
        )]);
        assert_eq!(v, expected);
    }

    #[test]
    fn to_serde_json() {
        let v = Value::from(vec![
            Value::Number(3.0),
            Value::Number(-0.5),
            Value::Number(f64::NAN),
        ]);
        assert_eq!(SerdeValue::from(v), json!([3, -0.5, null]));
    }

    #[test]
    fn integral_numbers_stay_integers() {
        assert_eq!(number_to_serde(42.0), json!(42));
        assert_eq!(number_to_serde(-7.0), json!(-7));
        assert!(number_to_serde(1e300).is_f64());
    }

    #[test]
    fn integer_range_edges() {
        assert_eq!(number_to_serde(-I64_BOUND), json!(i64::MIN));
        assert_eq!(number_to_serde(I64_BOUND), json!(1u64 << 63));
        assert!(number_to_serde(U64_BOUND).is_f64());
        assert!(number_to_serde(-I64_BOUND * 2.0).is_f64());
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        let n = number_to_serde(-0.0);
        assert!(n.is_f64());
        assert!(n.as_f64().is_some_and(|z| z == 0.0 && z.is_sign_negative()));
        assert_eq!(number_to_serde(0.0), json!(0));
    }
}
