//! Compact JSON text encoder.

use crate::value::{Map, Value};

const NULL: &str = "null";
const TRUE: &str = "true";
const FALSE: &str = "false";
const SLASH: &str = "\\\\";
const QUOTE: &str = "\\\"";
const RETURN: &str = "\\r";
const LINE: &str = "\\n";

/// Writes a [`Value`] as compact JSON text.
///
/// No whitespace is emitted. Strings escape only backslash, double quote,
/// carriage return and line feed; every other character is copied as-is.
pub struct JsonEncoder {
    pub writer: String,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {
            writer: String::new(),
        }
    }

    /// Encodes `value` and returns the text, leaving the buffer empty.
    pub fn encode(&mut self, value: &Value) -> String {
        self.writer.clear();
        self.write_any(value);
        std::mem::take(&mut self.writer)
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Number(n) => self.write_number(*n),
            Value::String(s) => self.write_str(s),
            Value::Array(items) => self.write_arr(items),
            Value::Object(map) => self.write_obj(map),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.push_str(NULL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.push_str(if b { TRUE } else { FALSE });
    }

    /// Writes the shortest decimal form that reads back to the same `f64`.
    ///
    /// `f64`'s `Display` never switches to exponent notation, so `3.0` is
    /// written as `3` and `1e-7` as `0.0000001`. NaN and infinities have no
    /// JSON spelling and are written as `null`.
    pub fn write_number(&mut self, n: f64) {
        if n.is_finite() {
            use std::fmt::Write;
            // Writing into a `String` cannot fail.
            let _ = write!(self.writer, "{n}");
        } else {
            self.write_null();
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.writer.reserve(s.len() + 2);
        self.writer.push('"');
        for c in s.chars() {
            match c {
                '\\' => self.writer.push_str(SLASH),
                '"' => self.writer.push_str(QUOTE),
                '\r' => self.writer.push_str(RETURN),
                '\n' => self.writer.push_str(LINE),
                _ => self.writer.push(c),
            }
        }
        self.writer.push('"');
    }

    pub fn write_arr(&mut self, items: &[Value]) {
        self.writer.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.push(',');
            }
            self.write_any(item);
        }
        self.writer.push(']');
    }

    pub fn write_obj(&mut self, map: &Map) {
        self.writer.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.writer.push(',');
            }
            self.write_str(key);
            self.writer.push(':');
            self.write_any(value);
        }
        self.writer.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: &Value) -> String {
        JsonEncoder::new().encode(value)
    }

    #[test]
    fn scalars() {
        assert_eq!(enc(&Value::Null), "null");
        assert_eq!(enc(&Value::Bool(true)), "true");
        assert_eq!(enc(&Value::Bool(false)), "false");
        assert_eq!(enc(&Value::Number(3.0)), "3");
        assert_eq!(enc(&Value::Number(-1.5)), "-1.5");
        assert_eq!(enc(&Value::Number(0.0000001)), "0.0000001");
    }

    #[test]
    fn non_finite_numbers_write_null() {
        assert_eq!(enc(&Value::Number(f64::NAN)), "null");
        assert_eq!(enc(&Value::Number(f64::INFINITY)), "null");
        assert_eq!(enc(&Value::Number(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn string_escape_table() {
        assert_eq!(enc(&Value::from("a\\b")), r#""a\\b""#);
        assert_eq!(enc(&Value::from("a\"b")), r#""a\"b""#);
        assert_eq!(enc(&Value::from("a\rb")), r#""a\rb""#);
        assert_eq!(enc(&Value::from("a\nb")), r#""a\nb""#);
    }

    #[test]
    fn other_characters_pass_through() {
        assert_eq!(enc(&Value::from("\t/\u{1}é🎉")), "\"\t/\u{1}é🎉\"");
    }

    #[test]
    fn containers_are_compact() {
        assert_eq!(enc(&Value::Array(vec![])), "[]");
        assert_eq!(enc(&Value::Object(Map::new())), "{}");
        let v = Value::from(vec![
            Value::from(1),
            Value::from(vec![2, 3]),
            Value::object_from([("a", 4)]),
        ]);
        assert_eq!(enc(&v), r#"[1,[2,3],{"a":4}]"#);
    }

    #[test]
    fn object_keys_are_escaped() {
        let v = Value::object_from([("q\"k", Value::Null)]);
        assert_eq!(enc(&v), r#"{"q\"k":null}"#);
    }

    #[test]
    fn encoder_is_reusable() {
        let mut encoder = JsonEncoder::new();
        assert_eq!(encoder.encode(&Value::from(1)), "1");
        assert_eq!(encoder.encode(&Value::from("x")), r#""x""#);
        assert!(encoder.writer.is_empty());
    }
}
