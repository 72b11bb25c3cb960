mod common;

use common::*;
use podrecord::{
    AuthHook, CreateOptions, Error, IndexKind, Resolver, Settings, SettingsPatch, StoreError,
};
use podrecord_store::memory::CallKind;
use podrecord_types::vocab::{rdf, solid};
use podrecord_types::{Document, Term, Thing};
use pretty_assertions::assert_eq;

fn resolver(pod: &Pod) -> Resolver {
    init_tracing();
    Resolver::new(pod.store.clone(), pod.settings.clone())
}

// ── User id and profile ─────────────────────────────────────────

#[tokio::test]
async fn fails_without_any_user_id() {
    let pod = Pod::new();
    let resolver = Resolver::new(pod.store.clone(), Settings::new());

    let err = resolver.resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NoUserId));
    assert!(pod.store.calls().is_empty());
}

#[tokio::test]
async fn explicit_user_id_wins_over_the_default() {
    let pod = Pod::new();
    pod.settings
        .configure(SettingsPatch::new().user_id("https://other.example/card#me"));
    pod.create(NOTES);
    pod.register(PUBLIC_INDEX, "notes", NOTE, NOTES);

    let url = resolver(&pod).resolve_location(NOTE, Some(ME), None).await.unwrap();
    assert_eq!(url, NOTES);
    assert_eq!(pod.store.urls(CallKind::Fetch)[0], PROFILE);
}

#[tokio::test]
async fn missing_profile_document_is_no_profile_found() {
    let pod = Pod::bare();
    let err = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NoProfileFound(user) if user == ME));
}

#[tokio::test]
async fn profile_without_the_user_subject_is_no_profile_found() {
    let pod = Pod::bare();
    pod.put_thing(
        PROFILE,
        Thing::at(format!("{PROFILE}#someone-else"))
            .add(solid::PUBLIC_TYPE_INDEX, Term::iri(PUBLIC_INDEX)),
    );

    let err = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NoProfileFound(_)));
}

#[tokio::test]
async fn unreadable_profile_surfaces_the_store_error() {
    let pod = Pod::new();
    pod.store.deny(PROFILE);

    let err = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::AccessDenied { .. })));
}

// ── Index walk ──────────────────────────────────────────────────

#[tokio::test]
async fn public_index_is_probed_before_private() {
    let pod = Pod::new();
    let private_notes = "https://pod.example/private/notes.ttl";
    pod.create(NOTES);
    pod.create(private_notes);
    pod.register(PRIVATE_INDEX, "notes", NOTE, private_notes);
    pod.register(PUBLIC_INDEX, "notes", NOTE, NOTES);

    let url = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap();
    assert_eq!(url, NOTES);
    assert!(!pod.store.urls(CallKind::Fetch).contains(&PRIVATE_INDEX.to_string()));
}

#[tokio::test]
async fn private_index_is_used_when_public_has_no_match() {
    let pod = Pod::new();
    let private_notes = "https://pod.example/private/notes.ttl";
    pod.create(private_notes);
    pod.register(PUBLIC_INDEX, "tasks", TASK, NOTES);
    pod.register(PRIVATE_INDEX, "notes", NOTE, private_notes);

    let url = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap();
    assert_eq!(url, private_notes);
}

#[tokio::test]
async fn inaccessible_registrations_are_skipped() {
    let pod = Pod::new();
    let locked = "https://pod.example/locked/notes.ttl";
    let missing = "https://pod.example/gone/notes.ttl";
    pod.create(locked);
    pod.store.deny(locked);
    pod.create(NOTES);
    pod.register(PUBLIC_INDEX, "a-locked", NOTE, locked);
    pod.register(PUBLIC_INDEX, "b-missing", NOTE, missing);
    pod.register(PUBLIC_INDEX, "c-open", NOTE, NOTES);

    let url = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap();
    assert_eq!(url, NOTES);
    assert_eq!(
        pod.store.urls(CallKind::Fetch),
        vec![
            PROFILE.to_string(),
            PUBLIC_INDEX.to_string(),
            locked.to_string(),
            missing.to_string(),
            NOTES.to_string(),
        ]
    );
}

#[tokio::test]
async fn unreadable_index_falls_through_to_the_next() {
    let pod = Pod::new();
    pod.create(NOTES);
    pod.register(PUBLIC_INDEX, "notes", NOTE, "https://pod.example/public/notes.ttl");
    pod.store.deny(PUBLIC_INDEX);
    pod.register(PRIVATE_INDEX, "notes", NOTE, NOTES);

    let url = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap();
    assert_eq!(url, NOTES);
}

#[tokio::test]
async fn untyped_registrations_are_ignored() {
    let pod = Pod::new();
    pod.create(NOTES);
    pod.put_thing(
        PUBLIC_INDEX,
        Thing::at(format!("{PUBLIC_INDEX}#untyped"))
            .add(solid::FOR_CLASS, Term::iri(NOTE))
            .add(solid::INSTANCE, Term::iri(NOTES)),
    );

    let err = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NoLocationFound(t) if t == NOTE));
}

#[tokio::test]
async fn exhausting_both_indexes_is_no_location_found() {
    let pod = Pod::new();
    pod.register(PUBLIC_INDEX, "tasks", TASK, NOTES);

    let err = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NoLocationFound(t) if t == NOTE));
}

#[tokio::test]
async fn absent_indexes_are_skipped() {
    let pod = Pod::bare();
    pod.put_thing(PROFILE, Thing::at(ME).add(rdf::TYPE, Term::iri("http://xmlns.com/foaf/0.1/Person")));

    let err = resolver(&pod).resolve_location(NOTE, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NoLocationFound(_)));
    assert_eq!(pod.store.urls(CallKind::Fetch), vec![PROFILE.to_string()]);
}

// ── Auth ────────────────────────────────────────────────────────

#[tokio::test]
async fn explicit_auth_is_used_for_every_fetch() {
    let pod = Pod::new();
    pod.create(NOTES);
    pod.register(PUBLIC_INDEX, "notes", NOTE, NOTES);
    let auth = AuthHook::bearer("explicit");

    resolver(&pod).resolve_location(NOTE, None, Some(&auth)).await.unwrap();

    let calls = pod.store.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls
        .iter()
        .all(|call| AuthHook::ptr_eq(call.auth.as_ref().unwrap(), &auth)));
}

#[tokio::test]
async fn default_auth_is_used_when_none_is_given() {
    let pod = Pod::new();
    let default = AuthHook::bearer("default");
    pod.settings.configure(SettingsPatch::new().auth(default.clone()));

    let _ = resolver(&pod).resolve_location(NOTE, None, None).await;

    assert!(pod
        .store
        .calls()
        .iter()
        .all(|call| AuthHook::ptr_eq(call.auth.as_ref().unwrap(), &default)));
}

// ── Create on demand ────────────────────────────────────────────

#[tokio::test]
async fn existing_location_is_returned_without_writes() {
    let pod = Pod::new();
    pod.create(NOTES);
    pod.register(PUBLIC_INDEX, "notes", NOTE, NOTES);

    let url = resolver(&pod)
        .resolve_or_create_location(NOTE, &CreateOptions::public("/elsewhere.ttl"), None, None)
        .await
        .unwrap();
    assert_eq!(url, NOTES);
    assert!(pod.store.urls(CallKind::Save).is_empty());
}

#[tokio::test]
async fn creates_relative_to_the_user_id_and_registers_once() {
    let pod = Pod::new();
    pod.register(PUBLIC_INDEX, "tasks", TASK, "https://pod.example/tasks.ttl");
    let before: Vec<Thing> = pod.store.document(PUBLIC_INDEX).unwrap().things().cloned().collect();

    let url = resolver(&pod)
        .resolve_or_create_location(NOTE, &CreateOptions::public("/public/notes.ttl"), None, None)
        .await
        .unwrap();

    assert_eq!(url, "https://pod.example/public/notes.ttl");
    assert!(pod.store.document(&url).unwrap().is_empty());
    assert_eq!(pod.store.urls(CallKind::Save), vec![url.clone(), PUBLIC_INDEX.to_string()]);

    let index = pod.store.document(PUBLIC_INDEX).unwrap();
    assert_eq!(index.len(), before.len() + 1);
    for thing in &before {
        assert!(index.things().any(|t| t == thing));
    }
    let added = index.things().find(|t| !before.contains(t)).unwrap();
    assert_eq!(added.values(rdf::TYPE), &[Term::iri(solid::TYPE_REGISTRATION)]);
    assert_eq!(added.values(solid::FOR_CLASS), &[Term::iri(NOTE)]);
    assert_eq!(added.values(solid::INSTANCE), &[Term::iri(url.as_str())]);
    assert_eq!(added.len(), 3);
}

#[tokio::test]
async fn create_keeps_an_existing_document_at_the_target() {
    let pod = Pod::new();
    let target = "https://pod.example/public/notes.ttl";
    let kept = Thing::at(format!("{target}#kept"))
        .add(rdf::TYPE, Term::iri(NOTE))
        .add(TITLE, Term::string("still here"));
    pod.put_thing(target, kept.clone());

    let url = resolver(&pod)
        .resolve_or_create_location(NOTE, &CreateOptions::public("/public/notes.ttl"), None, None)
        .await
        .unwrap();

    assert_eq!(url, target);
    let document = pod.store.document(target).unwrap();
    assert_eq!(document.len(), 1);
    assert!(document.things().any(|t| t == &kept));
    assert_eq!(pod.store.urls(CallKind::Save), vec![PUBLIC_INDEX.to_string()]);
    assert_eq!(pod.store.document(PUBLIC_INDEX).unwrap().len(), 1);
}

#[tokio::test]
async fn unreadable_index_fails_before_creating_anything() {
    let pod = Pod::new();
    pod.store.deny(PUBLIC_INDEX);
    let target = "https://pod.example/public/notes.ttl";

    let err = resolver(&pod)
        .resolve_or_create_location(NOTE, &CreateOptions::public("/public/notes.ttl"), None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::AccessDenied { .. })));
    assert!(pod.store.urls(CallKind::Save).is_empty());
    assert!(pod.store.document(target).is_none());
}

#[tokio::test]
async fn created_location_resolves_afterwards() {
    let pod = Pod::new();
    let resolver = resolver(&pod);
    let url = resolver
        .resolve_or_create_location(NOTE, &CreateOptions::private("notes.ttl"), None, None)
        .await
        .unwrap();

    assert_eq!(url, "https://pod.example/profile/notes.ttl");
    assert_eq!(pod.store.document(PRIVATE_INDEX).unwrap().len(), 1);
    assert!(pod.store.document(PUBLIC_INDEX).unwrap().is_empty());
    assert_eq!(resolver.resolve_location(NOTE, None, None).await.unwrap(), url);
}

#[tokio::test]
async fn absolute_paths_are_used_verbatim() {
    let pod = Pod::new();
    let url = resolver(&pod)
        .resolve_or_create_location(
            NOTE,
            &CreateOptions::public("https://storage.example/notes.ttl"),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(url, "https://storage.example/notes.ttl");
}

#[tokio::test]
async fn create_needs_the_requested_index() {
    let pod = Pod::bare();
    pod.put_thing(PROFILE, Thing::at(ME).add(solid::PUBLIC_TYPE_INDEX, Term::iri(PUBLIC_INDEX)));
    pod.store.insert(PUBLIC_INDEX, Document::new());

    let err = resolver(&pod)
        .resolve_or_create_location(NOTE, &CreateOptions::private("notes.ttl"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoIndexLocationFound(IndexKind::Private)));
    assert!(pod.store.urls(CallKind::Save).is_empty());
}

#[tokio::test]
async fn create_propagates_other_errors() {
    let pod = Pod::new();
    let resolver = Resolver::new(pod.store.clone(), Settings::new());
    let err = resolver
        .resolve_or_create_location(NOTE, &CreateOptions::public("notes.ttl"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoUserId));

    let pod = Pod::new();
    pod.store.deny(PROFILE);
    let err = Resolver::new(pod.store.clone(), pod.settings.clone())
        .resolve_or_create_location(NOTE, &CreateOptions::public("notes.ttl"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}
