//! Backend-neutral values for query parameters and result cells.
//!
//! Every backend converts its native cell type (`cozo::DataValue`, PostgreSQL
//! column types) into `Value` so row decoding lives in one place.

use std::fmt;

use cozo::{DataValue, Num};

/// A single parameter or result cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&Value> for DataValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => DataValue::Null,
            Value::Int(i) => DataValue::Num(Num::Int(*i)),
            Value::Text(s) => DataValue::Str(s.as_str().into()),
        }
    }
}

impl TryFrom<&DataValue> for Value {
    type Error = &'static str;

    fn try_from(value: &DataValue) -> Result<Self, Self::Error> {
        match value {
            DataValue::Null => Ok(Value::Null),
            DataValue::Num(Num::Int(i)) => Ok(Value::Int(*i)),
            DataValue::Str(s) => Ok(Value::Text(s.to_string())),
            DataValue::Num(Num::Float(_)) => Err("float"),
            DataValue::Bool(_) => Err("bool"),
            _ => Err("unsupported"),
        }
    }
}

/// Named query parameters in binding order.
///
/// Name-based backends (Cozo) bind `$name`; positional backends (PostgreSQL)
/// bind `$1..$n` in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Re-inserting a name replaces its value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Values only, in binding order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}
