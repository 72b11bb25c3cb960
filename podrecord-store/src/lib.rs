//! Document-store transports for podrecord.
//!
//! The core only ever fetches and saves whole documents. This crate provides:
//! - [`DocumentStore`]: the transport trait the resolver and repositories use
//! - [`HttpStore`]: Turtle documents over HTTP (GET/PUT), as served by pods
//! - [`memory::MemoryStore`]: an in-process store with access control and a
//!   call log, for tests and offline use
//! - [`AuthHook`]: per-request authentication
//! - [`Settings`]: the shared default user id and auth hook
//!
//! # Example
//!
//! ```
//! use podrecord_store::{DocumentStore, Settings, SettingsPatch};
//! use podrecord_store::memory::MemoryStore;
//! use podrecord_types::Document;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! store.save("https://pod.example/notes.ttl", Document::new(), None).await.unwrap();
//! assert!(store.fetch("https://pod.example/notes.ttl", None).await.is_ok());
//!
//! let settings = Settings::new();
//! settings.configure(SettingsPatch::new().user_id("https://pod.example/profile/card#me"));
//! assert!(settings.user_id().is_some());
//! # });
//! ```

mod auth;
mod error;
mod http;
pub mod memory;
mod settings;
mod store;
mod turtle;

pub use auth::AuthHook;
pub use error::{StoreError, StoreResult};
pub use http::{HttpStore, HttpStoreConfig};
pub use settings::{Settings, SettingsPatch};
pub use store::DocumentStore;
