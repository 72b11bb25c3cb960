//! The identity field: a record's key derived from its subject URL.

use crate::{SchemaError, SchemaResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use podrecord_types::Thing;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a subject URL maps to the identity value exposed on records.
///
/// Custom codecs must be mutual inverses. Nothing checks it; a broken pair
/// silently produces wrong identities.
#[derive(Clone, Default)]
pub enum IdentityCodec {
    /// The identity is the subject URL itself.
    #[default]
    Plain,
    /// The identity is the URL-safe, unpadded base64 of the subject URL,
    /// which keeps identities usable as route segments.
    Base64,
    /// Caller-supplied transforms.
    Custom {
        to_url: Transform,
        from_url: Transform,
    },
}

impl fmt::Debug for IdentityCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Base64 => f.write_str("Base64"),
            Self::Custom { .. } => f.write_str("Custom"),
        }
    }
}

/// Holds the subject URL of a record. Mandatory in every schema.
///
/// Writing is a no-op: the identity is the subject a record is attached to,
/// not a statement about it.
#[derive(Debug, Clone, Default)]
pub struct IdentityField {
    codec: IdentityCodec,
}

impl IdentityField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposes identities as base64 tokens instead of raw URLs.
    #[must_use]
    pub fn base64(self) -> Self {
        Self {
            codec: IdentityCodec::Base64,
        }
    }

    /// Uses caller-supplied transforms between identities and URLs.
    #[must_use]
    pub fn with_codec<T, F>(self, to_url: T, from_url: F) -> Self
    where
        T: Fn(&str) -> String + Send + Sync + 'static,
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            codec: IdentityCodec::Custom {
                to_url: Arc::new(to_url),
                from_url: Arc::new(from_url),
            },
        }
    }

    pub fn codec(&self) -> &IdentityCodec {
        &self.codec
    }

    /// Converts an identity value into the subject URL it stands for.
    pub fn to_subject_url(&self, identity: &str) -> SchemaResult<String> {
        match &self.codec {
            IdentityCodec::Plain => Ok(identity.to_string()),
            IdentityCodec::Base64 => URL_SAFE_NO_PAD
                .decode(identity.trim_end_matches('='))
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .ok_or_else(|| SchemaError::InvalidIdentity(identity.to_string())),
            IdentityCodec::Custom { to_url, .. } => Ok(to_url(identity)),
        }
    }

    /// Converts a subject URL into the identity exposed on records.
    pub fn from_subject_url(&self, url: &str) -> String {
        match &self.codec {
            IdentityCodec::Plain => url.to_string(),
            IdentityCodec::Base64 => URL_SAFE_NO_PAD.encode(url.as_bytes()),
            IdentityCodec::Custom { from_url, .. } => from_url(url),
        }
    }

    /// Reads the identity of `thing`.
    ///
    /// Subjects without a URL yet (local or blank) have no identity.
    pub fn read(&self, thing: &Thing) -> Option<Value> {
        thing
            .subject()
            .resolve(None)
            .map(|url| Value::String(self.from_subject_url(&url)))
    }

    /// Identity is never stored as a statement.
    pub fn write(&self, thing: Thing, _value: Option<&Value>) -> SchemaResult<Thing> {
        Ok(thing)
    }
}
