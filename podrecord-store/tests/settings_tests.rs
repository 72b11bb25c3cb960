use podrecord_store::{AuthHook, Settings, SettingsPatch};

const ME: &str = "https://pod.example/profile/card#me";

// ── Defaults ────────────────────────────────────────────────────

#[test]
fn starts_empty() {
    let settings = Settings::new();
    assert!(settings.user_id().is_none());
    assert!(settings.auth().is_none());
}

#[test]
fn configure_merges_patches() {
    let settings = Settings::new();
    let auth = AuthHook::bearer("t");
    settings.configure(SettingsPatch::new().user_id(ME));
    settings.configure(SettingsPatch::new().auth(auth.clone()));

    assert_eq!(settings.user_id().as_deref(), Some(ME));
    assert!(AuthHook::ptr_eq(&settings.auth().unwrap(), &auth));
}

#[test]
fn reset_clears_everything() {
    let settings = Settings::new();
    settings.configure(SettingsPatch::new().user_id(ME).auth(AuthHook::bearer("t")));
    settings.reset();
    assert!(settings.user_id().is_none());
    assert!(settings.auth().is_none());
}

#[test]
fn clones_share_state() {
    let settings = Settings::new();
    let other = settings.clone();
    other.configure(SettingsPatch::new().user_id(ME));
    assert_eq!(settings.user_id().as_deref(), Some(ME));
}

// ── Precedence ──────────────────────────────────────────────────

#[test]
fn explicit_values_win_over_defaults() {
    let settings = Settings::new();
    let default_auth = AuthHook::bearer("default");
    settings.configure(SettingsPatch::new().user_id(ME).auth(default_auth.clone()));

    let explicit = AuthHook::bearer("explicit");
    assert!(AuthHook::ptr_eq(&settings.auth_or(Some(&explicit)).unwrap(), &explicit));
    assert!(AuthHook::ptr_eq(&settings.auth_or(None).unwrap(), &default_auth));

    let other = "https://other.example/card#me";
    assert_eq!(settings.user_id_or(Some(other)).as_deref(), Some(other));
    assert_eq!(settings.user_id_or(None).as_deref(), Some(ME));
}

// ── Config files ────────────────────────────────────────────────

#[test]
fn patch_loads_user_id_from_json() {
    let patch: SettingsPatch = serde_json::from_str(&format!(r#"{{ "user_id": "{ME}" }}"#)).unwrap();
    assert_eq!(patch.user_id.as_deref(), Some(ME));
    assert!(patch.auth.is_none());

    let empty: SettingsPatch = serde_json::from_str("{}").unwrap();
    assert!(empty.user_id.is_none());
}
