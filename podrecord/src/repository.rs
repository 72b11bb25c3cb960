//! Typed CRUD over the subjects of one document.

use crate::resolver::{CreateOptions, Resolver};
use crate::{Error, Result};
use podrecord_schema::{Definition, Record, Schema, SchemaError};
use podrecord_store::{AuthHook, DocumentStore, Settings};
use podrecord_types::{Document, Thing};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// A ready schema, or fields still to be bound to a type.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    Schema(Schema),
    Definition(Definition),
}

impl SchemaSource {
    fn into_schema(self, type_url: Option<String>) -> Result<Schema> {
        match self {
            Self::Schema(schema) => Ok(schema),
            Self::Definition(definition) => {
                let type_url = type_url.ok_or(Error::NoTypeDefined)?;
                Ok(Schema::new(type_url, definition)?)
            }
        }
    }
}

impl From<Schema> for SchemaSource {
    fn from(schema: Schema) -> Self {
        Self::Schema(schema)
    }
}

impl From<Definition> for SchemaSource {
    fn from(definition: Definition) -> Self {
        Self::Definition(definition)
    }
}

/// Configuration for a repository over a known document.
#[derive(Debug, Clone)]
pub struct RepositoryOptions {
    /// URL of the document holding the records.
    pub source: String,
    /// Record type; required when `schema` is a bare definition.
    pub type_url: Option<String>,
    pub schema: SchemaSource,
    /// Overrides the default auth hook for this repository.
    pub auth: Option<AuthHook>,
}

impl RepositoryOptions {
    pub fn new(source: impl Into<String>, schema: impl Into<SchemaSource>) -> Self {
        Self {
            source: source.into(),
            type_url: None,
            schema: schema.into(),
            auth: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn with_auth(mut self, auth: AuthHook) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// Configuration for a repository whose document is found through the
/// user's type indexes.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub type_url: Option<String>,
    pub schema: SchemaSource,
    /// Overrides the default user id for resolution.
    pub user_id: Option<String>,
    pub auth: Option<AuthHook>,
}

impl ResolveOptions {
    pub fn new(schema: impl Into<SchemaSource>) -> Self {
        Self {
            type_url: None,
            schema: schema.into(),
            user_id: None,
            auth: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_auth(mut self, auth: AuthHook) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// What [`Repository::find`] returns.
pub enum Query<'a, T> {
    /// Every subject of the schema type.
    All,
    /// The subjects with these identities, skipping missing or differently
    /// typed ones.
    Keys(Vec<String>),
    /// Every subject of the schema type whose record passes the filter.
    Filter(&'a dyn Fn(&T) -> bool),
}

impl<T> Query<'_, T> {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }
}

/// What [`Repository::only`] looks up.
pub enum Lookup<'a, T> {
    Key(&'a str),
    Filter(&'a dyn Fn(&T) -> bool),
}

/// What [`Repository::remove`] deletes.
pub enum Target<'a, T> {
    Key(&'a str),
    Record(&'a T),
}

/// Reads and writes records of type `T` in one document.
///
/// Every operation fetches a fresh copy of the document; writes replace the
/// whole document with a single save.
pub struct Repository<T> {
    source: String,
    schema: Schema,
    auth: Option<AuthHook>,
    store: Arc<dyn DocumentStore>,
    settings: Settings,
    _record: PhantomData<fn() -> T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a repository over `options.source`.
    ///
    /// Fails with [`Error::NoTypeDefined`] when the schema is a bare
    /// definition and no type is given.
    pub fn new(
        options: RepositoryOptions,
        store: Arc<dyn DocumentStore>,
        settings: Settings,
    ) -> Result<Self> {
        let schema = options.schema.into_schema(options.type_url)?;
        Ok(Self {
            source: options.source,
            schema,
            auth: options.auth,
            store,
            settings,
            _record: PhantomData,
        })
    }

    /// Creates a repository over the document registered for the schema
    /// type.
    ///
    /// With `create` set, a missing location is created and registered
    /// instead of failing with [`Error::NoLocationFound`].
    pub async fn resolve(
        options: ResolveOptions,
        create: Option<CreateOptions>,
        store: Arc<dyn DocumentStore>,
        settings: Settings,
    ) -> Result<Self> {
        let schema = options.schema.into_schema(options.type_url)?;
        let resolver = Resolver::new(Arc::clone(&store), settings.clone());
        let user_id = options.user_id.as_deref();
        let auth = options.auth.as_ref();

        let source = match &create {
            Some(create) => {
                resolver
                    .resolve_or_create_location(schema.type_url(), create, user_id, auth)
                    .await?
            }
            None => {
                resolver
                    .resolve_location(schema.type_url(), user_id, auth)
                    .await?
            }
        };

        Ok(Self {
            source,
            schema,
            auth: options.auth,
            store,
            settings,
            _record: PhantomData,
        })
    }

    /// URL of the document this repository manages.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the matching records in document order.
    pub async fn find(&self, query: Query<'_, T>) -> Result<Vec<T>> {
        let document = self.fetch().await?;

        let records = match query {
            Query::All => self.typed(&document).collect::<Result<Vec<_>>>()?,
            Query::Keys(keys) => {
                let mut records = Vec::with_capacity(keys.len());
                for key in &keys {
                    if let Some(record) = self.by_key(&document, key)? {
                        records.push(record);
                    }
                }
                records
            }
            Query::Filter(filter) => {
                let mut records = Vec::new();
                for record in self.typed(&document) {
                    let record = record?;
                    if filter(&record) {
                        records.push(record);
                    }
                }
                records
            }
        };

        debug!("Found {} records in {}", records.len(), self.source);
        Ok(records)
    }

    /// Returns the first matching record, if any.
    pub async fn only(&self, lookup: Lookup<'_, T>) -> Result<Option<T>> {
        match lookup {
            Lookup::Key(key) => {
                let document = self.fetch().await?;
                self.by_key(&document, key)
            }
            Lookup::Filter(filter) => Ok(self.find(Query::Filter(filter)).await?.into_iter().next()),
        }
    }

    /// Creates or updates `records`, then stores each record's identity.
    ///
    /// Records with an identity update that subject; the others get a new
    /// subject. Identities are written back only once the document is saved.
    pub async fn save(&self, records: &mut [T]) -> Result<()> {
        let auth = self.auth();
        let mut document = self.store.fetch(&self.source, auth.as_ref()).await?;
        let mut saved = Vec::with_capacity(records.len());

        for record in records.iter() {
            let mut record = Record::from_typed(record)?;
            let identity = self.schema.identity_of(&record);
            let thing = if identity.is_empty() {
                Thing::local()
            } else {
                let url = self.schema.subject_url(identity)?;
                document
                    .thing(&url)
                    .cloned()
                    .unwrap_or_else(|| Thing::at(url))
            };

            let thing = self.schema.write(thing, &record)?;
            let subject = thing.subject().clone();
            document = document.set_thing(thing);

            if let Some(url) = subject.resolve(Some(&self.source)) {
                self.schema.set_identity(&mut record, &url);
            }
            saved.push(record.into_typed::<T>()?);
        }

        self.store
            .save(&self.source, document, auth.as_ref())
            .await?;
        info!("Saved {} records to {}", saved.len(), self.source);

        for (slot, record) in records.iter_mut().zip(saved) {
            *slot = record;
        }
        Ok(())
    }

    /// Removes every statement about the targeted subjects.
    pub async fn remove(&self, targets: &[Target<'_, T>]) -> Result<()> {
        let auth = self.auth();
        let mut document = self.store.fetch(&self.source, auth.as_ref()).await?;

        for target in targets {
            let url = match target {
                Target::Key(key) => self.schema.subject_url(*key)?,
                Target::Record(record) => self.schema.subject_url(&Record::from_typed(*record)?)?,
            };
            document = document.remove_thing(&url);
        }

        self.store
            .save(&self.source, document, auth.as_ref())
            .await?;
        info!("Removed {} records from {}", targets.len(), self.source);
        Ok(())
    }

    fn auth(&self) -> Option<AuthHook> {
        self.settings.auth_or(self.auth.as_ref())
    }

    async fn fetch(&self) -> Result<Document> {
        let auth = self.auth();
        Ok(self.store.fetch(&self.source, auth.as_ref()).await?)
    }

    fn convert(&self, thing: &Thing) -> Result<T> {
        Ok(self.schema.read(thing).into_typed()?)
    }

    fn typed<'d>(&'d self, document: &'d Document) -> impl Iterator<Item = Result<T>> + 'd {
        document
            .things()
            .filter(|thing| self.schema.of_type(thing))
            .map(|thing| self.convert(thing))
    }

    fn by_key(&self, document: &Document, key: &str) -> Result<Option<T>> {
        let url = match self.schema.subject_url(key) {
            Ok(url) => url,
            Err(SchemaError::InvalidIdentity(_)) => {
                debug!("No subject for malformed key {}", key);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        document
            .thing(&url)
            .filter(|thing| self.schema.of_type(thing))
            .map(|thing| self.convert(thing))
            .transpose()
    }
}
