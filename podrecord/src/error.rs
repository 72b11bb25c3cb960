//! Error types for resolution and repository operations.

use podrecord_schema::SchemaError;
use podrecord_store::StoreError;
use thiserror::Error;

/// Result type for podrecord operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving locations or managing records.
#[derive(Debug, Error)]
pub enum Error {
    /// A repository was given a field definition without a record type.
    #[error("no record type given for the field definition")]
    NoTypeDefined,

    /// No user id was passed and no default is configured.
    #[error("no user id given and no default configured")]
    NoUserId,

    /// The profile document is missing or has no subject for the user.
    #[error("no profile found for {0}")]
    NoProfileFound(String),

    /// Neither type index holds an accessible document for the type.
    #[error("no accessible location found for type {0}")]
    NoLocationFound(String),

    /// The profile does not declare the requested type index.
    #[error("the profile declares no {0} type index")]
    NoIndexLocationFound(crate::IndexKind),

    /// A create path could not be resolved against the user id.
    #[error("invalid path {path}: {message}")]
    InvalidPath { path: String, message: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
