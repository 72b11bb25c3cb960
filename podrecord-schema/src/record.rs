use crate::{SchemaError, SchemaResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat record: field name to JSON value.
///
/// Application types cross into the schema engine through [`Record::from_typed`]
/// and come back out through [`Record::into_typed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes a typed record.
    pub fn from_typed<T: Serialize>(data: &T) -> SchemaResult<Self> {
        match serde_json::to_value(data)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(SchemaError::NotAnObject),
        }
    }

    /// Deserializes into a typed record.
    pub fn into_typed<T: DeserializeOwned>(self) -> SchemaResult<T> {
        Ok(serde_json::from_value(Value::Object(self.0))?)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Extracts a string value from the record.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
