//! Schema-driven marshalling between records and statements.
//!
//! A [`Schema`] binds a record type URL to an ordered set of fields:
//! - [`ScalarField`] reads/writes one value at one or more predicates
//! - [`RepeatedField`] reads/writes an ordered list of values
//! - [`IdentityField`] maps the subject URL itself to the record identity
//!
//! Fields are usually built through the [`is`] constructors:
//!
//! ```
//! use podrecord_schema::{is, Definition, Schema};
//!
//! let schema = Schema::new(
//!     "https://www.w3.org/2002/01/bookmark#Bookmark",
//!     Definition::new()
//!         .field("id", is::key().base64())
//!         .field("title", is::string(["http://purl.org/dc/elements/1.1/title"]))
//!         .field("tags", is::strings(["http://example.org/tag"])),
//! )
//! .unwrap();
//!
//! assert_eq!(schema.type_url(), "https://www.w3.org/2002/01/bookmark#Bookmark");
//! ```

mod error;
mod field;
mod identity;
mod kind;
mod record;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use field::{Converter, RepeatedField, ScalarField};
pub use identity::{IdentityCodec, IdentityField};
pub use kind::ValueKind;
pub use record::Record;
pub use schema::{is, Definition, Field, Key, Schema};
