use podrecord_store::memory::{CallKind, MemoryStore};
use podrecord_store::{AuthHook, DocumentStore, StoreError};
use podrecord_types::{Document, Subject, Term, Thing};
use pretty_assertions::assert_eq;

const DOC: &str = "https://pod.example/notes.ttl";
const NAME: &str = "https://schema.org/name";

// ── Fetch and save ──────────────────────────────────────────────

#[tokio::test]
async fn fetch_missing_document_is_not_found() {
    let store = MemoryStore::new();
    let err = store.fetch(DOC, None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn save_then_fetch_returns_the_persisted_document() {
    let store = MemoryStore::new();
    let doc = Document::new().set_thing(Thing::local().add(NAME, Term::string("A")));

    let saved = store.save(DOC, doc, None).await.unwrap();
    assert_eq!(saved.url(), Some(DOC));
    assert!(matches!(saved.things().next().unwrap().subject(), Subject::Url(_)));

    assert_eq!(store.fetch(DOC, None).await.unwrap(), saved);
}

#[tokio::test]
async fn save_replaces_the_whole_document() {
    let store = MemoryStore::new().with_document(
        DOC,
        Document::new().set_thing(Thing::at(format!("{DOC}#old")).add(NAME, Term::string("old"))),
    );
    store.save(DOC, Document::new(), None).await.unwrap();
    assert!(store.document(DOC).unwrap().is_empty());
}

// ── Access control ──────────────────────────────────────────────

#[tokio::test]
async fn denied_urls_fail_both_ways() {
    let store = MemoryStore::new().with_document(DOC, Document::new());
    store.deny(DOC);

    let err = store.fetch(DOC, None).await.unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied { status: 403, .. }));
    let err = store.save(DOC, Document::new(), None).await.unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied { .. }));
}

// ── Call log ────────────────────────────────────────────────────

#[tokio::test]
async fn logs_every_call_with_its_auth() {
    let store = MemoryStore::new();
    let auth = AuthHook::bearer("token");

    let _ = store.fetch(DOC, Some(&auth)).await;
    store.save(DOC, Document::new(), None).await.unwrap();

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].kind, CallKind::Fetch);
    assert!(AuthHook::ptr_eq(calls[0].auth.as_ref().unwrap(), &auth));
    assert_eq!(calls[1].kind, CallKind::Save);
    assert!(calls[1].auth.is_none());

    assert_eq!(store.urls(CallKind::Save), vec![DOC.to_string()]);
    store.clear_calls();
    assert!(store.calls().is_empty());
}

#[test]
fn seeding_does_not_log() {
    let store = MemoryStore::new().with_document(DOC, Document::new());
    assert!(store.calls().is_empty());
    assert_eq!(store.document(DOC).unwrap().url(), Some(DOC));
}
