//! Typed records stored in per-user linked-data documents.
//!
//! A [`Repository`] maps records of one Rust type to subjects of one
//! document through a [`Schema`]. When the document is not known up front,
//! the [`Resolver`] finds it through the user's public and private type
//! indexes, creating and registering it on demand.
//!
//! ```no_run
//! use podrecord::{is, CreateOptions, Definition, Query, Repository, ResolveOptions};
//! use podrecord::{HttpStore, HttpStoreConfig, Settings, SettingsPatch};
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Bookmark {
//!     id: Option<String>,
//!     title: Option<String>,
//! }
//!
//! # async fn run() -> podrecord::Result<()> {
//! let settings = Settings::new();
//! settings.configure(SettingsPatch::new().user_id("https://alice.pod.example/profile/card#me"));
//!
//! let store = Arc::new(HttpStore::new(HttpStoreConfig::default())?);
//! let bookmarks: Repository<Bookmark> = Repository::resolve(
//!     ResolveOptions::new(
//!         Definition::new()
//!             .field("id", is::key())
//!             .field("title", is::string(["http://purl.org/dc/elements/1.1/title"])),
//!     )
//!     .with_type("http://www.w3.org/2002/01/bookmark#Bookmark"),
//!     Some(CreateOptions::private("/private/bookmarks.ttl")),
//!     store,
//!     settings,
//! )
//! .await?;
//!
//! for bookmark in bookmarks.find(Query::All).await? {
//!     println!("{:?}", bookmark.title);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod repository;
mod resolver;

pub use error::{Error, Result};
pub use repository::{
    Lookup, Query, Repository, RepositoryOptions, ResolveOptions, SchemaSource, Target,
};
pub use resolver::{CreateOptions, IndexKind, Resolver, TypeRegistration};

pub use podrecord_schema::{is, Definition, Record, Schema, SchemaError};
pub use podrecord_store::{
    AuthHook, DocumentStore, HttpStore, HttpStoreConfig, Settings, SettingsPatch, StoreError,
};
pub use podrecord_types::{Document, Term, Thing};
