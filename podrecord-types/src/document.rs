//! Documents: the unit fetched from and saved to a store.

use crate::Thing;
use serde::{Deserialize, Serialize};

/// An ordered collection of things, optionally bound to the URL it was
/// fetched from or saved to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    url: Option<String>,
    things: Vec<Thing>,
}

impl Document {
    /// Creates an empty document that has not been persisted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document bound to `url`.
    #[must_use]
    pub fn at(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            things: Vec::new(),
        }
    }

    /// Source URL of the document, once fetched or saved.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Iterates over things in document order.
    pub fn things(&self) -> impl Iterator<Item = &Thing> {
        self.things.iter()
    }

    /// Number of subjects in the document.
    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Total number of statements across all subjects.
    pub fn statement_count(&self) -> usize {
        self.things.iter().map(Thing::len).sum()
    }

    /// Finds the thing whose subject resolves to `url`.
    pub fn thing(&self, url: &str) -> Option<&Thing> {
        let base = self.url();
        self.things.iter().find(|t| t.subject().is(url, base))
    }

    /// Inserts `thing`, replacing the thing with the same subject if present.
    ///
    /// A thing without statements removes its subject instead.
    #[must_use]
    pub fn set_thing(mut self, thing: Thing) -> Self {
        let position = self.things.iter().position(|t| t.subject() == thing.subject());
        match (position, thing.is_empty()) {
            (Some(i), true) => {
                self.things.remove(i);
            }
            (Some(i), false) => self.things[i] = thing,
            (None, true) => {}
            (None, false) => self.things.push(thing),
        }
        self
    }

    /// Removes every statement about the subject resolving to `url`.
    #[must_use]
    pub fn remove_thing(mut self, url: &str) -> Self {
        let base = self.url.clone();
        self.things
            .retain(|t| !t.subject().is(url, base.as_deref()));
        self
    }

    /// Binds the document to `url`, turning local subjects into full URLs.
    #[must_use]
    pub fn persisted(self, url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            things: self.things.into_iter().map(|t| t.persisted(url)).collect(),
        }
    }
}

impl FromIterator<Thing> for Document {
    fn from_iter<I: IntoIterator<Item = Thing>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Document::set_thing)
    }
}
