//! Names for subjects that have not been persisted yet.
//!
//! Uses UUID v7 so that subjects created in one session sort by creation time
//! once they land in a document.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fragment name of a subject created in memory.
///
/// A local subject becomes `<document-url>#<name>` once the document holding
/// it is saved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(String);

impl LocalId {
    /// Creates a fresh local id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Wraps an existing fragment name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the fragment name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves this id against a document URL.
    ///
    /// Any fragment already present on `base` is replaced.
    #[must_use]
    pub fn resolve(&self, base: &str) -> String {
        let base = base.split_once('#').map_or(base, |(doc, _)| doc);
        format!("{base}#{}", self.0)
    }
}

impl Default for LocalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
