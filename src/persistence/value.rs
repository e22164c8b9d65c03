//! The values a record can hold.
//!
//! A [`Record`] has no fixed shape: each key maps to a [`Value`], which is
//! one of the JSON kinds plus two escape hatches.
//!
//! - [`Value::Raw`] is text that is already encoded. It is stored and
//! compared exactly as given.
//! - [`Value::Opaque`] is a host value with no canonical serialization. It is
//! stored as its debug text and comes back as a plain string.

use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::Number;

/// A single schema-less document. Key order is not significant for equality.
pub type Record = IndexMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Record),

    /// Already-encoded text, never passed through the serializer.
    Raw(String),

    /// A foreign value; see [`Opaque`].
    Opaque(Opaque),
}

/// A host value the store cannot serialize.
///
/// Two opaque values are equal only when they share the same allocation.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Debug + Send + Sync>);

impl Opaque {
    pub fn new<T: Debug + Send + Sync + 'static>(value: T) -> Opaque {
        Opaque(Arc::new(value))
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.0.as_ref(), f)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Value {
    pub fn raw(text: impl Into<String>) -> Value {
        //! Wrap text that must be stored or compared verbatim.

        Value::Raw(text.into())
    }

    pub fn opaque<T: Debug + Send + Sync + 'static>(value: T) -> Value {
        Value::Opaque(Opaque::new(value))
    }

    pub fn into_record(self) -> Option<Record> {
        //! Unwrap a mapping value into a [`Record`].
        //!
        //! Returns [`None`] for every other kind of value.

        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Strings inside containers are quoted, top-level ones are not.
        match self {
            Value::String(text) | Value::Raw(text) => write!(f, "{:?}", text),
            other => Display::fmt(other, f),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) | Value::Raw(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(record) => record.serialize(serializer),
            Value::Opaque(_) => Err(S::Error::custom(
                "opaque value has no canonical serialization",
            )),
        }
    }
}

/// The human readable form of a value, used as the text fallback for
/// values the serializer rejects.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) | Value::Raw(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Object(record) => {
                write!(f, "{{")?;
                for (index, (key, item)) in record.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: ", key)?;
                    item.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
            Value::Opaque(opaque) => write!(f, "{:?}", opaque),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        // NaN and the infinities have no JSON number; follow serde_json and store null.
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
