//! Schemas: a record type bound to an ordered set of fields.

use crate::{IdentityField, Record, RepeatedField, ScalarField, SchemaError, SchemaResult};
use podrecord_types::vocab::rdf;
use podrecord_types::{Term, Thing};
use serde_json::Value;

/// One field of a definition.
#[derive(Debug, Clone)]
pub enum Field {
    Scalar(ScalarField),
    Repeated(RepeatedField),
    Identity(IdentityField),
}

impl From<ScalarField> for Field {
    fn from(field: ScalarField) -> Self {
        Self::Scalar(field)
    }
}

impl From<RepeatedField> for Field {
    fn from(field: RepeatedField) -> Self {
        Self::Repeated(field)
    }
}

impl From<IdentityField> for Field {
    fn from(field: IdentityField) -> Self {
        Self::Identity(field)
    }
}

/// Named fields in declaration order, not yet bound to a type.
#[derive(Debug, Clone, Default)]
pub struct Definition {
    fields: Vec<(String, Field)>,
}

impl Definition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. A later field with the same name replaces the
    /// earlier one in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        let name = name.into();
        let field = field.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = field,
            None => self.fields.push((name, field)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Identifies a subject either by identity value or by a full record.
#[derive(Debug, Clone, Copy)]
pub enum Key<'a> {
    Identity(&'a str),
    Record(&'a Record),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(identity: &'a str) -> Self {
        Self::Identity(identity)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(identity: &'a String) -> Self {
        Self::Identity(identity)
    }
}

impl<'a> From<&'a Record> for Key<'a> {
    fn from(record: &'a Record) -> Self {
        Self::Record(record)
    }
}

#[derive(Debug, Clone)]
enum ValueField {
    Scalar(ScalarField),
    Repeated(RepeatedField),
}

impl ValueField {
    fn read(&self, thing: &Thing) -> Option<Value> {
        match self {
            Self::Scalar(field) => field.read(thing),
            Self::Repeated(field) => field.read(thing),
        }
    }

    fn write(&self, thing: Thing, value: Option<&Value>) -> SchemaResult<Thing> {
        match self {
            Self::Scalar(field) => field.write(thing, value),
            Self::Repeated(field) => field.write(thing, value),
        }
    }
}

/// Maps records of one type to and from statements about a subject.
///
/// Built once from a [`Definition`]; the identity field is split out at
/// construction so reads and writes never inspect field variants.
#[derive(Debug, Clone)]
pub struct Schema {
    type_url: String,
    identity_name: String,
    identity: IdentityField,
    fields: Vec<(String, ValueField)>,
}

impl Schema {
    /// Binds `definition` to the record type `type_url`.
    ///
    /// Fails with [`SchemaError::NoIdentityDefined`] when no identity field
    /// is declared and [`SchemaError::DuplicateIdentity`] when several are.
    pub fn new(type_url: impl Into<String>, definition: Definition) -> SchemaResult<Self> {
        let mut identity: Option<(String, IdentityField)> = None;
        let mut fields = Vec::with_capacity(definition.fields.len());

        for (name, field) in definition.fields {
            match field {
                Field::Identity(field) => {
                    if let Some((first, _)) = &identity {
                        return Err(SchemaError::DuplicateIdentity {
                            first: first.clone(),
                            second: name,
                        });
                    }
                    identity = Some((name, field));
                }
                Field::Scalar(field) => fields.push((name, ValueField::Scalar(field))),
                Field::Repeated(field) => fields.push((name, ValueField::Repeated(field))),
            }
        }

        let (identity_name, identity) = identity.ok_or(SchemaError::NoIdentityDefined)?;
        Ok(Self {
            type_url: type_url.into(),
            identity_name,
            identity,
            fields,
        })
    }

    /// The record type URL written as `rdf:type`.
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// Name of the record property holding the identity.
    pub fn identity_name(&self) -> &str {
        &self.identity_name
    }

    pub fn identity(&self) -> &IdentityField {
        &self.identity
    }

    /// Whether `thing` is typed with this schema's type.
    pub fn of_type(&self, thing: &Thing) -> bool {
        thing
            .values(rdf::TYPE)
            .iter()
            .any(|term| term.as_iri() == Some(self.type_url.as_str()))
    }

    /// Returns the identity stored on `record`, empty when unset.
    pub fn identity_of<'r>(&self, record: &'r Record) -> &'r str {
        record.get_str(&self.identity_name).unwrap_or_default()
    }

    /// Resolves an identity value or a record to its subject URL.
    pub fn subject_url<'a>(&self, key: impl Into<Key<'a>>) -> SchemaResult<String> {
        let identity = match key.into() {
            Key::Identity(identity) => identity,
            Key::Record(record) => self.identity_of(record),
        };
        self.identity.to_subject_url(identity)
    }

    /// Stores the identity derived from `url` on `record`.
    pub fn set_identity(&self, record: &mut Record, url: &str) {
        record.insert(
            self.identity_name.clone(),
            self.identity.from_subject_url(url),
        );
    }

    /// Writes the type statement and every value field of `record`.
    pub fn write(&self, thing: Thing, record: &Record) -> SchemaResult<Thing> {
        let thing = thing.set(rdf::TYPE, Term::iri(&self.type_url));
        self.fields.iter().try_fold(thing, |thing, (name, field)| {
            field
                .write(thing, record.get(name))
                .map_err(|e| e.in_field(name))
        })
    }

    /// Reads every field, identity included, into a fresh record.
    pub fn read(&self, thing: &Thing) -> Record {
        let mut record = Record::new();
        record.insert(
            self.identity_name.clone(),
            self.identity.read(thing).unwrap_or(Value::Null),
        );
        for (name, field) in &self.fields {
            record.insert(name.clone(), field.read(thing).unwrap_or(Value::Null));
        }
        record
    }
}

/// Field constructors.
///
/// Each constructor takes the predicates the field maps to. Plural forms
/// build repeated fields.
pub mod is {
    use crate::{IdentityField, RepeatedField, ScalarField, ValueKind};

    /// The identity field holding the subject URL.
    pub fn key() -> IdentityField {
        IdentityField::new()
    }

    macro_rules! constructors {
        ($($one:ident, $many:ident => $kind:ident;)*) => {
            $(
                #[doc = concat!("A single `", stringify!($one), "` value.")]
                pub fn $one<I, S>(predicates: I) -> ScalarField
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    ScalarField::new(ValueKind::$kind, predicates)
                }

                #[doc = concat!("A list of `", stringify!($one), "` values.")]
                pub fn $many<I, S>(predicates: I) -> RepeatedField
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    RepeatedField::new(ValueKind::$kind, predicates)
                }
            )*
        };
    }

    constructors! {
        string, strings => String;
        boolean, booleans => Boolean;
        url, urls => Url;
        datetime, datetimes => DateTime;
        decimal, decimals => Decimal;
        integer, integers => Integer;
    }
}
