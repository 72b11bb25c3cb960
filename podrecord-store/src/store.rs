//! Transport abstraction.
//!
//! Defines the trait every document store implements, so the resolver and
//! repositories work against any backend.

use crate::{AuthHook, StoreResult};
use async_trait::async_trait;
use podrecord_types::Document;

/// A store that fetches and saves whole documents by URL.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches the document at `url`.
    async fn fetch(&self, url: &str, auth: Option<&AuthHook>) -> StoreResult<Document>;

    /// Replaces the document at `url` and returns it as persisted, with
    /// local subjects resolved against `url`.
    async fn save(
        &self,
        url: &str,
        document: Document,
        auth: Option<&AuthHook>,
    ) -> StoreResult<Document>;
}
