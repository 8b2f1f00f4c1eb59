use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an authenticated user, as recovered from a session cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of checking a request for an authenticated session
///
/// `RedirectRequired` ends normal handling of the request: the caller must
/// send the browser to `location` instead of doing the protected work.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an anonymous request has to be redirected"]
pub enum SessionGate {
    Authenticated(UserId),
    RedirectRequired(String),
}

impl SessionGate {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            SessionGate::Authenticated(user_id) => Some(user_id),
            SessionGate::RedirectRequired(_) => None,
        }
    }
}

/// A redirect response prepared by the session manager
///
/// `headers` already contains `Location` and the `Set-Cookie` header.
#[derive(Debug, Clone)]
pub struct SessionRedirect {
    pub location: String,
    pub headers: HeaderMap,
}

/// What the encrypted cookie carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct SessionPayload {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub(super) user_id: Option<String>,
}

impl SessionPayload {
    pub(super) fn for_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
        }
    }

    /// The embedded user id, if there is a usable one
    pub(super) fn into_user_id(self) -> Option<UserId> {
        self.user_id.filter(|id| !id.is_empty()).map(UserId)
    }
}
