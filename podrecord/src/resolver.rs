//! Storage-location resolution through the user's type indexes.
//!
//! A user's profile points at a public and a private type index. Each index
//! lists registrations saying which document holds instances of which type.
//! Resolution walks both indexes, public first, and returns the first
//! registered document the caller can read.

use crate::{Error, Result};
use podrecord_schema::{is, Definition, Record, Schema, SchemaResult};
use podrecord_store::{AuthHook, DocumentStore, Settings, StoreError};
use podrecord_types::vocab::solid;
use podrecord_types::{Document, Term, Thing};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which type index a new registration goes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Public,
    Private,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// Where to create a document when no location can be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Absolute URL, or a path relative to the user id.
    pub path: String,
    #[serde(default)]
    pub index: IndexKind,
}

impl CreateOptions {
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index: IndexKind::Public,
        }
    }

    pub fn private(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index: IndexKind::Private,
        }
    }
}

/// One type index entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRegistration {
    pub url: Option<String>,
    pub for_class: Option<String>,
    pub instance: Option<String>,
}

impl TypeRegistration {
    pub fn new(for_class: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            url: None,
            for_class: Some(for_class.into()),
            instance: Some(instance.into()),
        }
    }

    /// Shape of a registration subject in an index document.
    pub fn schema() -> SchemaResult<Schema> {
        Schema::new(
            solid::TYPE_REGISTRATION,
            Definition::new()
                .field("url", is::key())
                .field("forClass", is::url([solid::FOR_CLASS]))
                .field("instance", is::url([solid::INSTANCE])),
        )
    }
}

#[derive(Debug, Default)]
struct TypeIndexes {
    public: Option<String>,
    private: Option<String>,
}

impl TypeIndexes {
    fn get(&self, kind: IndexKind) -> Option<&str> {
        match kind {
            IndexKind::Public => self.public.as_deref(),
            IndexKind::Private => self.private.as_deref(),
        }
    }
}

/// Finds, or creates, the document holding a record type.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn DocumentStore>,
    settings: Settings,
}

impl Resolver {
    pub fn new(store: Arc<dyn DocumentStore>, settings: Settings) -> Self {
        Self { store, settings }
    }

    /// Returns the first readable document registered for `type_url`.
    ///
    /// `user_id` and `auth` fall back to the configured defaults. Index and
    /// instance fetch failures are skipped; only exhausting both indexes
    /// fails, with [`Error::NoLocationFound`].
    pub async fn resolve_location(
        &self,
        type_url: &str,
        user_id: Option<&str>,
        auth: Option<&AuthHook>,
    ) -> Result<String> {
        let user_id = self.settings.user_id_or(user_id).ok_or(Error::NoUserId)?;
        let auth = self.settings.auth_or(auth);
        let auth = auth.as_ref();

        let indexes = self.type_indexes(&user_id, auth).await?;
        let schema = TypeRegistration::schema()?;

        for index in [indexes.public, indexes.private].into_iter().flatten() {
            let document = match self.store.fetch(&index, auth).await {
                Ok(document) => document,
                Err(e) => {
                    warn!("Skipping unreadable type index {}: {}", index, e);
                    continue;
                }
            };

            for instance in registered_instances(&schema, &document, type_url) {
                match self.store.fetch(&instance, auth).await {
                    Ok(_) => {
                        debug!("Resolved {} to {}", type_url, instance);
                        return Ok(instance);
                    }
                    Err(e) => debug!("Skipping inaccessible instance {}: {}", instance, e),
                }
            }
        }

        Err(Error::NoLocationFound(type_url.to_string()))
    }

    /// Like [`resolve_location`](Self::resolve_location), but registers the
    /// target when no location is found. The target is created empty unless a
    /// document already exists there. The index is read before anything is
    /// written.
    pub async fn resolve_or_create_location(
        &self,
        type_url: &str,
        options: &CreateOptions,
        user_id: Option<&str>,
        auth: Option<&AuthHook>,
    ) -> Result<String> {
        match self.resolve_location(type_url, user_id, auth).await {
            Err(Error::NoLocationFound(_)) => {}
            resolved => return resolved,
        }

        let user_id = self.settings.user_id_or(user_id).ok_or(Error::NoUserId)?;
        let auth = self.settings.auth_or(auth);
        let auth = auth.as_ref();

        let indexes = self.type_indexes(&user_id, auth).await?;
        let index = indexes
            .get(options.index)
            .ok_or(Error::NoIndexLocationFound(options.index))?;
        let target = target_url(&options.path, &user_id)?;

        let index_document = self.store.fetch(index, auth).await?;

        match self.store.fetch(&target, auth).await {
            Ok(_) => debug!("Reusing existing document {} for {}", target, type_url),
            Err(StoreError::NotFound(_)) => {
                self.store.save(&target, Document::new(), auth).await?;
                info!("Created document {} for {}", target, type_url);
            }
            Err(e) => return Err(e.into()),
        }

        let schema = TypeRegistration::schema()?;
        let registration = schema.write(
            Thing::local(),
            &Record::from_typed(&TypeRegistration::new(type_url, &target))?,
        )?;
        self.store
            .save(index, index_document.set_thing(registration), auth)
            .await?;
        info!("Registered {} in {} index {}", type_url, options.index, index);

        Ok(target)
    }

    async fn type_indexes(&self, user_id: &str, auth: Option<&AuthHook>) -> Result<TypeIndexes> {
        let profile_url = user_id.split('#').next().unwrap_or(user_id);
        let profile = self.store.fetch(profile_url, auth).await.map_err(|e| match e {
            StoreError::NotFound(_) => Error::NoProfileFound(user_id.to_string()),
            other => Error::Store(other),
        })?;
        let me = profile
            .thing(user_id)
            .ok_or_else(|| Error::NoProfileFound(user_id.to_string()))?;

        let first_iri = |predicate: &str| {
            me.values(predicate)
                .iter()
                .find_map(Term::as_iri)
                .map(str::to_string)
        };
        Ok(TypeIndexes {
            public: first_iri(solid::PUBLIC_TYPE_INDEX),
            private: first_iri(solid::PRIVATE_TYPE_INDEX),
        })
    }
}

/// Instances registered for `type_url` in an index, in document order.
fn registered_instances(schema: &Schema, index: &Document, type_url: &str) -> Vec<String> {
    index
        .things()
        .filter(|thing| schema.of_type(thing))
        .filter_map(|thing| schema.read(thing).into_typed::<TypeRegistration>().ok())
        .filter(|registration| registration.for_class.as_deref() == Some(type_url))
        .filter_map(|registration| registration.instance)
        .collect()
}

/// Resolves a create path: absolute URLs are used as-is, anything else is
/// joined onto the user id.
fn target_url(path: &str, user_id: &str) -> Result<String> {
    if Url::parse(path).is_ok() {
        return Ok(path.to_string());
    }
    Url::parse(user_id)
        .and_then(|base| base.join(path))
        .map(String::from)
        .map_err(|e| Error::InvalidPath {
            path: path.to_string(),
            message: e.to_string(),
        })
}
