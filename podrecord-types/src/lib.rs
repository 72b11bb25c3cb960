//! Statement model for podrecord.
//!
//! This crate defines the data that flows between the schema engine and the
//! document-store transports:
//! - [`Term`] and [`Literal`]: the object position of a statement
//! - [`Subject`] and [`Thing`]: one subject with its predicate/value lists
//! - [`Document`]: an ordered collection of things fetched and saved as one unit
//! - [`LocalId`]: names for subjects created in memory before they are persisted
//! - [`vocab`]: the fixed predicate and class URLs the core reads and writes
//!
//! Things and documents are copy-on-write: every update consumes the value and
//! returns the updated one.

mod document;
mod ids;
mod term;
mod thing;
pub mod vocab;

pub use document::Document;
pub use ids::LocalId;
pub use term::{Literal, Term};
pub use thing::{Subject, Thing};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building statement values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {datatype} literal: {value}")]
    InvalidLiteral { value: String, datatype: String },
}
