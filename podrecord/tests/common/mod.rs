#![allow(dead_code)]

use podrecord::{is, Definition, Schema, Settings, SettingsPatch};
use podrecord_store::memory::MemoryStore;
use podrecord_types::vocab::{rdf, solid};
use podrecord_types::{Document, Term, Thing};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ME: &str = "https://pod.example/profile/card#me";
pub const PROFILE: &str = "https://pod.example/profile/card";
pub const PUBLIC_INDEX: &str = "https://pod.example/settings/publicTypeIndex.ttl";
pub const PRIVATE_INDEX: &str = "https://pod.example/settings/privateTypeIndex.ttl";

pub const NOTE: &str = "https://schema.org/NoteDigitalDocument";
pub const TASK: &str = "https://schema.org/Action";
pub const NOTES: &str = "https://pod.example/notes.ttl";

pub const TITLE: &str = "https://schema.org/name";
pub const TITLE_DC: &str = "http://purl.org/dc/terms/title";
pub const TAG: &str = "https://schema.org/keywords";
pub const DONE: &str = "https://schema.org/completed";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub done: Option<bool>,
}

impl Note {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

pub fn note_fields() -> Definition {
    Definition::new()
        .field("id", is::key())
        .field("title", is::string([TITLE, TITLE_DC]))
        .field("tags", is::strings([TAG]))
        .field("done", is::boolean([DONE]))
}

pub fn note_schema() -> Schema {
    Schema::new(NOTE, note_fields()).unwrap()
}

/// A pod with a profile declaring both type indexes, both empty.
pub struct Pod {
    pub store: Arc<MemoryStore>,
    pub settings: Settings,
}

impl Pod {
    pub fn new() -> Self {
        let pod = Self::bare();
        pod.store.insert(
            PROFILE,
            Document::new().set_thing(
                Thing::at(ME)
                    .add(solid::PUBLIC_TYPE_INDEX, Term::iri(PUBLIC_INDEX))
                    .add(solid::PRIVATE_TYPE_INDEX, Term::iri(PRIVATE_INDEX)),
            ),
        );
        pod.store.insert(PUBLIC_INDEX, Document::new());
        pod.store.insert(PRIVATE_INDEX, Document::new());
        pod
    }

    /// A pod with nothing stored and the default user id set.
    pub fn bare() -> Self {
        let settings = Settings::new();
        settings.configure(SettingsPatch::new().user_id(ME));
        Self {
            store: Arc::new(MemoryStore::new()),
            settings,
        }
    }

    /// Adds a registration subject `<index>#<name>` to an index document.
    pub fn register(&self, index: &str, name: &str, for_class: &str, instance: &str) {
        let thing = registration(&format!("{index}#{name}"), for_class, instance);
        self.put_thing(index, thing);
    }

    /// Stores an empty document.
    pub fn create(&self, url: &str) {
        self.store.insert(url, Document::new());
    }

    pub fn put_thing(&self, url: &str, thing: Thing) {
        let document = self.store.document(url).unwrap_or_default();
        self.store.insert(url, document.set_thing(thing));
    }
}

pub fn registration(subject: &str, for_class: &str, instance: &str) -> Thing {
    Thing::at(subject)
        .add(rdf::TYPE, Term::iri(solid::TYPE_REGISTRATION))
        .add(solid::FOR_CLASS, Term::iri(for_class))
        .add(solid::INSTANCE, Term::iri(instance))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
