//! Error types for the schema layer.

use crate::ValueKind;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building a schema or marshalling a record.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The definition has no identity field.
    #[error("a schema needs an is::key() field to hold the subject URL")]
    NoIdentityDefined,

    /// The definition has more than one identity field.
    #[error("identity already held by field `{first}`, `{second}` cannot hold it too")]
    DuplicateIdentity { first: String, second: String },

    /// A record value does not have the shape the field kind expects.
    #[error("{value} cannot be stored as {kind}")]
    InvalidValue {
        kind: ValueKind,
        value: serde_json::Value,
    },

    /// Wraps an error raised by a named field.
    #[error("field `{name}`: {source}")]
    Field {
        name: String,
        source: Box<SchemaError>,
    },

    /// An identity value that does not decode to a subject URL.
    #[error("identity `{0}` does not decode to a subject URL")]
    InvalidIdentity(String),

    /// A typed record that does not serialize to a flat object.
    #[error("records must serialize to an object")]
    NotAnObject,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn in_field(self, name: &str) -> Self {
        Self::Field {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}
