//! value representation
//!
//! An environment document contains the following data types
//! - null
//! - boolean (true/false)
//! - integer (signed, i64)
//! - decimal (f64)
//! - big number (integers outside of i64 and numbers f64 can't hold, kept exactly as read)
//! - string (utf-8)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Additionally:
//! - every `integer` is also a `decimal`, so `1` and `1.0` compare equal
//! - `true`/`false` compare equal to `1`/`0`
//!
//! Objects keep the order their keys were read in. Documents are written back in that same order.
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Deserializer, Serializer,
};

/// Order-preserving mapping of keys to values
pub type Object = indexmap::IndexMap<String, Value>;

/// All possible value types
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    BigNumber(serde_json::Number),
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Short name of the variant, used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::BigNumber(_) => "big number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Boolean(a), Value::Integer(b)) | (Value::Integer(b), Value::Boolean(a)) => {
                i64::from(*a) == *b
            }
            (Value::Boolean(a), Value::Decimal(b)) | (Value::Decimal(b), Value::Boolean(a)) => {
                f64::from(u8::from(*a)) == *b
            }
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Integer(a), Value::Decimal(b)) | (Value::Decimal(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::BigNumber(a), Value::BigNumber(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // key order is irrelevant for equality
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Number> for Value {
    fn from(value: serde_json::Number) -> Self {
        if let Some(int) = value.as_i64() {
            return Value::Integer(int);
        }

        let is_integer = !value.to_string().contains(&['.', 'e', 'E'][..]);
        match value.as_f64() {
            Some(decimal) if !is_integer && decimal.is_finite() => Value::Decimal(decimal),
            _ => Value::BigNumber(value),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => b.into(),
            serde_json::Value::Number(n) => n.into(),
            serde_json::Value::String(s) => s.into(),
            serde_json::Value::Array(a) => a.into(),
            serde_json::Value::Object(o) => {
                Value::Object(o.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl std::fmt::Display for Value {
    /// Compact json
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::BigNumber(value) => match value.as_u64() {
                Some(unsigned) => serializer.serialize_u64(unsigned),
                // written verbatim by serde_json
                None => serde::ser::Serialize::serialize(value, serializer),
            },
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

impl<'de> serde::de::Deserialize<'de> for Value {
    /// Reads through [serde_json::Value], which keeps key order and exact number text
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <serde_json::Value as serde::de::Deserialize>::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_order_survives_round_trip() {
        let source = r#"{"zeta":1,"alpha":{"m":true,"b":null},"mid":[1.5,"x"]}"#;
        let value: Value = serde_json::from_str(source).unwrap();

        let Value::Object(object) = &value else {
            panic!("expected an object, found {}", value.kind());
        };
        let keys: Vec<_> = object.keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        assert_eq!(serde_json::to_string(&value).unwrap(), source);
    }

    #[test]
    fn integer_equals_decimal() {
        assert_eq!(Value::Integer(2), Value::Decimal(2.0));
        assert_ne!(Value::Integer(2), Value::String("2".into()));
    }

    #[test]
    fn boolean_equals_one_and_zero() {
        assert_eq!(Value::Boolean(true), Value::Integer(1));
        assert_eq!(Value::Integer(0), Value::Boolean(false));
        assert_eq!(Value::Boolean(true), Value::Decimal(1.0));
        assert_ne!(Value::Boolean(true), Value::Integer(2));
        assert_ne!(Value::Boolean(false), Value::Null);
    }

    #[test]
    fn large_integers_are_kept_verbatim() {
        for source in [
            "18446744073709551615",
            "123456789012345678901234567890",
            "-99999999999999999999",
        ] {
            let value: Value = serde_json::from_str(source).unwrap();
            assert_eq!(value.kind(), "big number");
            assert_eq!(value.to_string(), source);
        }
    }

    #[test]
    fn decimals_stay_decimals() {
        let value: Value = serde_json::from_str("0.25").unwrap();
        assert_eq!(value.kind(), "decimal");
        assert_eq!(value.to_string(), "0.25");
    }
}
