use std::fmt;
use std::sync::Arc;

type Authorize = dyn Fn(&str, &str) -> Option<String> + Send + Sync;

/// Authenticates outgoing requests.
///
/// Called with the HTTP method and URL of each request; returns the value of
/// the `Authorization` header to send, if any.
#[derive(Clone)]
pub struct AuthHook(Arc<Authorize>);

impl AuthHook {
    pub fn new<F>(authorize: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(authorize))
    }

    /// Sends the same bearer token with every request.
    pub fn bearer(token: impl Into<String>) -> Self {
        let header = format!("Bearer {}", token.into());
        Self::new(move |_, _| Some(header.clone()))
    }

    /// Returns the `Authorization` header value for a request.
    pub fn authorization(&self, method: &str, url: &str) -> Option<String> {
        (self.0)(method, url)
    }

    /// Whether both handles point to the same hook.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for AuthHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthHook").finish_non_exhaustive()
    }
}
