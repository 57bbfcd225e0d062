//! serde bridge.
//!
//! [`to_value`] maps the serde data model onto [`Value`]: booleans, every
//! integer and float width, chars and strings, options, sequences, tuples,
//! maps and structs. Raw byte buffers and enum variants that carry data
//! have no counterpart and fail with [`JsonError::UnsupportedValueKind`].
//!
//! Map keys of any scalar or compound type are turned into their textual
//! form. The only rejected key is a null one (`()` or `None`).
//!
//! Deserialization goes through `serde_json`.

use serde::de::DeserializeOwned;
use serde::ser::{self, Impossible, Serialize};

use crate::error::JsonError;
use crate::value::{Map, Value};

/// Converts any serializable value into a [`Value`].
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> Result<Value, JsonError> {
    value.serialize(ValueSerializer)
}

/// Serializes `value` directly to compact JSON text.
pub fn to_string<T: ?Sized + Serialize>(value: &T) -> Result<String, JsonError> {
    let value = to_value(value)?;
    Ok(crate::stringify(&value))
}

/// Deserializes a `T` from a [`Value`].
///
/// Integral numbers are offered to the visitor as integers, so integer
/// fields accept them.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, JsonError> {
    Ok(serde_json::from_value(serde_json::Value::from(value))?)
}

/// Parses `s` and deserializes a `T` from the result.
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, JsonError> {
    from_value(crate::parse(s)?)
}

impl Serialize for Value {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map),
        }
    }
}

fn key_text<T: ?Sized + Serialize>(key: &T) -> Result<String, JsonError> {
    match key.serialize(ValueSerializer)? {
        Value::Null => Err(JsonError::UnsupportedValueKind("null map key")),
        other => Ok(other.into_key()),
    }
}

/// Serializer whose output is a [`Value`].
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = JsonError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = Impossible<Value, JsonError>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = Impossible<Value, JsonError>;

    fn serialize_bool(self, v: bool) -> Result<Value, JsonError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, JsonError> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, JsonError> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, JsonError> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, JsonError> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value, JsonError> {
        Err(JsonError::UnsupportedValueKind("bytes"))
    }

    fn serialize_none(self) -> Result<Value, JsonError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, JsonError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, JsonError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, JsonError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, JsonError> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, JsonError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value, JsonError> {
        Err(JsonError::UnsupportedValueKind("newtype variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, JsonError> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, JsonError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, JsonError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, JsonError> {
        Err(JsonError::UnsupportedValueKind("tuple variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, JsonError> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap, JsonError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, JsonError> {
        Err(JsonError::UnsupportedValueKind("struct variant"))
    }
}

pub struct SerializeVec {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = JsonError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), JsonError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, JsonError> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = JsonError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), JsonError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, JsonError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = JsonError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), JsonError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, JsonError> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeMap {
    map: Map,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = JsonError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), JsonError> {
        self.next_key = Some(key_text(key)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), JsonError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| JsonError::Custom("map value without a key".to_owned()))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, JsonError> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = JsonError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), JsonError> {
        self.map
            .insert(key.to_owned(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, JsonError> {
        Ok(Value::Object(self.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn scalars() {
        assert_eq!(to_value(&true).unwrap(), Value::Bool(true));
        assert_eq!(to_value(&7u64).unwrap(), Value::Number(7.0));
        assert_eq!(to_value(&-2i128).unwrap(), Value::Number(-2.0));
        assert_eq!(to_value(&'c').unwrap(), Value::from("c"));
        assert_eq!(to_value(&()).unwrap(), Value::Null);
        assert_eq!(to_value(&None::<u8>).unwrap(), Value::Null);
        assert_eq!(to_value(&Some(1.5)).unwrap(), Value::Number(1.5));
    }

    #[test]
    fn sequences_and_tuples() {
        assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
        assert_eq!(to_string(&(1, "a", false)).unwrap(), r#"[1,"a",false]"#);
    }

    #[test]
    fn map_keys_are_stringified() {
        let mut m = BTreeMap::new();
        m.insert(10, "ten");
        assert_eq!(to_string(&m).unwrap(), r#"{"10":"ten"}"#);

        let mut m = BTreeMap::new();
        m.insert(true, 1);
        assert_eq!(to_string(&m).unwrap(), r#"{"true":1}"#);

        let mut m = BTreeMap::new();
        m.insert(vec![1, 2], 0);
        assert_eq!(to_string(&m).unwrap(), r#"{"[1,2]":0}"#);
    }

    #[test]
    fn null_key_is_rejected() {
        let mut m = BTreeMap::new();
        m.insert(None::<i32>, 1);
        assert!(matches!(
            to_value(&m),
            Err(JsonError::UnsupportedValueKind("null map key"))
        ));
    }

    #[test]
    fn bytes_are_unsupported() {
        struct Raw;
        impl Serialize for Raw {
            fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_bytes(b"raw")
            }
        }
        assert!(matches!(
            to_value(&Raw),
            Err(JsonError::UnsupportedValueKind("bytes"))
        ));
    }

    #[test]
    fn value_serializes_to_itself() {
        let v = Value::from(vec![
            Value::Null,
            Value::from("s"),
            Value::object_from([("k", 1)]),
        ]);
        assert_eq!(to_value(&v).unwrap(), v);
    }
}
