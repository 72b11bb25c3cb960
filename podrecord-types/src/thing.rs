//! A single subject and the statements made about it.

use crate::{LocalId, Term};
use serde::{Deserialize, Serialize};

/// Identifies the subject of a [`Thing`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// A persisted subject with a full URL.
    Url(String),
    /// A subject created in memory, named once its document is saved.
    Local(LocalId),
    /// A blank node read from a document.
    Blank(String),
}

impl Subject {
    /// Returns the URL of this subject relative to the document at `base`.
    ///
    /// Blank nodes have no URL.
    pub fn resolve(&self, base: Option<&str>) -> Option<String> {
        match self {
            Self::Url(url) => Some(url.clone()),
            Self::Local(id) => base.map(|base| id.resolve(base)),
            Self::Blank(_) => None,
        }
    }

    /// Whether this subject is `url` once resolved against `base`.
    pub fn is(&self, url: &str, base: Option<&str>) -> bool {
        match self {
            Self::Url(own) => own == url,
            Self::Local(id) => base.is_some_and(|base| id.resolve(base) == url),
            Self::Blank(_) => false,
        }
    }
}

/// One subject with its predicate/value lists.
///
/// Predicates and their values keep insertion order. Every update consumes
/// the thing and returns the updated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    subject: Subject,
    predicates: Vec<(String, Vec<Term>)>,
}

impl Thing {
    /// Creates an empty thing for `subject`.
    #[must_use]
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            predicates: Vec::new(),
        }
    }

    /// Creates an empty thing at a persisted URL.
    #[must_use]
    pub fn at(url: impl Into<String>) -> Self {
        Self::new(Subject::Url(url.into()))
    }

    /// Creates an empty thing with a fresh local subject.
    #[must_use]
    pub fn local() -> Self {
        Self::new(Subject::Local(LocalId::new()))
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the values stored at `predicate`, in insertion order.
    pub fn values(&self, predicate: &str) -> &[Term] {
        self.predicates
            .iter()
            .find(|(p, _)| p == predicate)
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Iterates over `(predicate, value)` pairs.
    pub fn statements(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.predicates
            .iter()
            .flat_map(|(p, values)| values.iter().map(move |v| (p.as_str(), v)))
    }

    /// Number of statements about this subject.
    pub fn len(&self) -> usize {
        self.predicates.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every value at `predicate` with `value`.
    #[must_use]
    pub fn set(self, predicate: &str, value: Term) -> Self {
        self.remove_all(predicate).add(predicate, value)
    }

    /// Appends `value` at `predicate`.
    #[must_use]
    pub fn add(mut self, predicate: &str, value: Term) -> Self {
        match self.predicates.iter_mut().find(|(p, _)| p == predicate) {
            Some((_, values)) => values.push(value),
            None => self.predicates.push((predicate.to_string(), vec![value])),
        }
        self
    }

    /// Removes every value at `predicate`.
    #[must_use]
    pub fn remove_all(mut self, predicate: &str) -> Self {
        self.predicates.retain(|(p, _)| p != predicate);
        self
    }

    /// Resolves a local subject against `base`. Values are left as they are.
    #[must_use]
    pub(crate) fn persisted(mut self, base: &str) -> Self {
        if let Subject::Local(id) = &self.subject {
            self.subject = Subject::Url(id.resolve(base));
        }
        self
    }
}
