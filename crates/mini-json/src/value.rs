//! Dynamic JSON value tree.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::encoder::JsonEncoder;
use crate::error::JsonError;

/// Object storage. Unordered; equality ignores key order.
pub type Map = HashMap<String, Value>;

/// A JSON value.
///
/// Every number is an `f64`: integer and fractional literals decode to the
/// same variant. A tree owns all of its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Builds an object, converting every key to its textual form.
    ///
    /// Later entries overwrite earlier ones with the same key.
    pub fn object_from<K, V, I>(entries: I) -> Self
    where
        K: ToString,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        entries.into_iter().collect()
    }

    /// Consumes the value and returns the text it stands for as an object key.
    ///
    /// Strings give their content; anything else gives its compact JSON text.
    pub fn into_key(self) -> String {
        match self {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    /// Short name of the variant, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up element `index` if this is an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut encoder = JsonEncoder::new();
        f.write_str(&encoder.encode(self))
    }
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl<K: ToString, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_from_stringifies_keys() {
        let v = Value::object_from([(1, "one"), (2, "two")]);
        assert_eq!(v.get("1"), Some(&Value::from("one")));
        assert_eq!(v.get("2"), Some(&Value::from("two")));
    }

    #[test]
    fn object_from_last_write_wins() {
        let v = Value::object_from([("a", 1), ("a", 2)]);
        assert_eq!(v.as_object().map(Map::len), Some(1));
        assert_eq!(v.get("a"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn into_key_uses_text_form() {
        assert_eq!(Value::from("k").into_key(), "k");
        assert_eq!(Value::Number(1.0).into_key(), "1");
        assert_eq!(Value::Number(1.5).into_key(), "1.5");
        assert_eq!(Value::Bool(true).into_key(), "true");
        assert_eq!(Value::Null.into_key(), "null");
    }

    #[test]
    fn integers_become_doubles() {
        assert_eq!(Value::from(3), Value::Number(3.0));
        assert_eq!(Value::from(-7i64), Value::Number(-7.0));
        assert_eq!(Value::from(2u8), Value::Number(2.0));
    }

    #[test]
    fn option_and_vec_conversions() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn object_equality_ignores_order() {
        let a = Value::object_from([("x", 1), ("y", 2)]);
        let b = Value::object_from([("y", 2), ("x", 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn accessors() {
        let v = Value::from(vec![Value::from(true), Value::from("s")]);
        assert!(v.is_array());
        assert_eq!(v.get_index(0).and_then(Value::as_bool), Some(true));
        assert_eq!(v.get_index(1).and_then(Value::as_str), Some("s"));
        assert_eq!(v.get_index(2), None);
        assert_eq!(v.get("a"), None);
        assert_eq!(Value::Null.kind(), "null");
        assert!(Value::default().is_null());
    }
}
