//! mini-json - a small compact JSON codec.
//!
//! [`stringify`] writes a [`Value`] tree as JSON text with no whitespace, and
//! [`parse`] reads the first JSON value out of a string.
//!
//! The format is a subset of JSON:
//!
//! - numbers are `f64`, written with Rust's shortest round-trip form and read
//!   as `-?digits(.digits)?` (no exponent, no leading `+`);
//! - strings escape only `\\`, `\"`, `\r` and `\n`; `\uXXXX` and the other
//!   escapes are rejected when reading;
//! - objects are unordered and the last duplicate key wins.
//!
//! Reading is permissive by default: keywords are matched on their first
//! letter and text after the value is ignored. [`DecoderOptions`] turns on
//! stricter checks.
//!
//! ```
//! use mini_json::{parse, stringify, Value};
//!
//! let v = parse(r#"[1, "two", {"three": null}]"#).unwrap();
//! assert_eq!(v.get_index(0), Some(&Value::Number(1.0)));
//! assert_eq!(stringify(&v), r#"[1,"two",{"three":null}]"#);
//! ```

mod convert;

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod ser;
pub mod value;

pub use decoder::{JsonDecoder, Token};
pub use encoder::JsonEncoder;
pub use error::JsonError;
pub use options::DecoderOptions;
pub use ser::{from_str, from_value, to_string, to_value};
pub use value::{Map, Value};

/// Writes `value` as compact JSON text.
pub fn stringify(value: &Value) -> String {
    JsonEncoder::new().encode(value)
}

/// Parses the first JSON value in `text` with the default, permissive options.
pub fn parse(text: &str) -> Result<Value, JsonError> {
    parse_with_options(text, DecoderOptions::default())
}

/// Parses the first JSON value in `text`.
pub fn parse_with_options(text: &str, options: DecoderOptions) -> Result<Value, JsonError> {
    log::trace!("parsing {} bytes", text.len());
    let result = JsonDecoder::with_options(options).decode(text);
    if let Err(err) = &result {
        log::debug!("parse failed: {err}");
    }
    result
}

/// Parses the first JSON value in `bytes`, which must be UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value, JsonError> {
    let text = std::str::from_utf8(bytes).map_err(|err| {
        log::debug!(
            "parse failed: invalid UTF-8 after byte {}",
            err.valid_up_to()
        );
        JsonError::InvalidUtf8
    })?;
    parse(text)
}
