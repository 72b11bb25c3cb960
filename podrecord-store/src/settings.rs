//! Process-wide defaults shared by repositories and resolvers.

use crate::AuthHook;
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};

/// A partial update to [`Settings`]. Fields left as `None` keep their
/// current value.
///
/// Deserializable so the default user id can come from a config file; the
/// auth hook is always set in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub user_id: Option<String>,
    #[serde(skip)]
    pub auth: Option<AuthHook>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn auth(mut self, auth: AuthHook) -> Self {
        self.auth = Some(auth);
        self
    }
}

#[derive(Debug, Default)]
struct Defaults {
    user_id: Option<String>,
    auth: Option<AuthHook>,
}

/// Shared handle to the default user id and auth hook.
///
/// Clones share state: a repository created from one handle sees later
/// `configure` calls made through any other clone.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    inner: Arc<RwLock<Defaults>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `patch` into the current defaults.
    pub fn configure(&self, patch: SettingsPatch) {
        let mut defaults = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(user_id) = patch.user_id {
            tracing::debug!(%user_id, "default user id configured");
            defaults.user_id = Some(user_id);
        }
        if let Some(auth) = patch.auth {
            defaults.auth = Some(auth);
        }
    }

    /// Clears every default.
    pub fn reset(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Defaults::default();
    }

    pub fn user_id(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user_id
            .clone()
    }

    pub fn auth(&self) -> Option<AuthHook> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .auth
            .clone()
    }

    /// The explicit user id if given, otherwise the default.
    pub fn user_id_or(&self, explicit: Option<&str>) -> Option<String> {
        explicit.map(str::to_string).or_else(|| self.user_id())
    }

    /// The explicit auth hook if given, otherwise the default.
    pub fn auth_or(&self, explicit: Option<&AuthHook>) -> Option<AuthHook> {
        explicit.cloned().or_else(|| self.auth())
    }
}
