//! In-process document store.
//!
//! Holds documents in a map keyed by URL. URLs can be denied to simulate
//! access control, and every call is logged so callers can assert on the
//! traffic a repository generates.

use crate::{AuthHook, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use podrecord_types::Document;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Which operation a [`StoreCall`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Fetch,
    Save,
}

/// One call made against a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct StoreCall {
    pub kind: CallKind,
    pub url: String,
    pub auth: Option<AuthHook>,
}

/// A document store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Document>>,
    denied: Mutex<HashSet<String>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document.
    #[must_use]
    pub fn with_document(self, url: &str, document: Document) -> Self {
        self.insert(url, document);
        self
    }

    /// Stores `document` at `url` without logging a call.
    pub fn insert(&self, url: &str, document: Document) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), document.persisted(url));
    }

    /// Makes every fetch and save of `url` fail with access denied.
    pub fn deny(&self, url: &str) {
        self.denied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string());
    }

    /// Returns the stored document at `url`, bypassing access control.
    pub fn document(&self, url: &str) -> Option<Document> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Returns every call made so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the URLs of calls of one kind, oldest first.
    pub fn urls(&self, kind: CallKind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.kind == kind)
            .map(|call| call.url)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, kind: CallKind, url: &str, auth: Option<&AuthHook>) -> StoreResult<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoreCall {
                kind,
                url: url.to_string(),
                auth: auth.cloned(),
            });
        let denied = self
            .denied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url);
        if denied {
            return Err(StoreError::AccessDenied {
                url: url.to_string(),
                status: 403,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch(&self, url: &str, auth: Option<&AuthHook>) -> StoreResult<Document> {
        self.record(CallKind::Fetch, url, auth)?;
        self.document(url)
            .ok_or_else(|| StoreError::NotFound(url.to_string()))
    }

    async fn save(
        &self,
        url: &str,
        document: Document,
        auth: Option<&AuthHook>,
    ) -> StoreResult<Document> {
        self.record(CallKind::Save, url, auth)?;
        let document = document.persisted(url);
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), document.clone());
        Ok(document)
    }
}
