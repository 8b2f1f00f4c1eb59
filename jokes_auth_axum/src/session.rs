use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, OriginalUri},
    response::{IntoResponse, Response},
};
use http::{StatusCode, header::LOCATION, request::Parts};

use jokes_auth::{
    PublicUser, SessionGate, SessionRedirect, UserId, get_session_user_id, get_user,
    login_redirect_location, require_session_user_id,
};

/// Path of the request as the browser sent it, without the query
///
/// Nested routers see a stripped URI, so the original one is preferred.
pub(crate) fn requested_path(parts_uri: &http::Uri, original: Option<&OriginalUri>) -> String {
    let uri = original.map(|o| &o.0).unwrap_or(parts_uri);
    uri.path().to_string()
}

/// Redirect to the login page, returned when a protected route is hit anonymously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    location: String,
}

impl LoginRedirect {
    pub fn new(location: String) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        tracing::debug!("Redirecting to {}", self.location);
        (StatusCode::FOUND, [(LOCATION, self.location)]).into_response()
    }
}

/// A redirect prepared by the session manager, with its `Set-Cookie` header
pub struct SessionResponse(pub SessionRedirect);

impl IntoResponse for SessionResponse {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, self.0.headers).into_response()
    }
}

/// The authenticated user's id, available as an Axum extractor
///
/// Anonymous requests are rejected with a [`LoginRedirect`] that brings the
/// user back to the requested path after logging in. Use
/// `Option<SessionUserId>` on pages that anonymous visitors may also see.
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use jokes_auth_axum::SessionUserId;
///
/// async fn new_joke(SessionUserId(user_id): SessionUserId) -> String {
///     format!("Posting as {user_id}")
/// }
///
/// let app: Router = Router::new().route("/jokes/new", get(new_joke));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUserId(pub UserId);

impl<S> FromRequestParts<S> for SessionUserId
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let redirect_to = requested_path(&parts.uri, parts.extensions.get::<OriginalUri>());

        match require_session_user_id(&parts.headers, &redirect_to) {
            SessionGate::Authenticated(user_id) => Ok(SessionUserId(user_id)),
            SessionGate::RedirectRequired(location) => Err(LoginRedirect::new(location)),
        }
    }
}

impl<S> OptionalFromRequestParts<S> for SessionUserId
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(get_session_user_id(&parts.headers).map(SessionUserId))
    }
}

/// The authenticated user, looked up from the session's user id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

impl From<PublicUser> for AuthUser {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

pub enum AuthUserRejection {
    Login(LoginRedirect),
    /// Details are logged, never sent to the client
    Internal,
}

impl IntoResponse for AuthUserRejection {
    fn into_response(self) -> Response {
        match self {
            AuthUserRejection::Login(redirect) => redirect.into_response(),
            AuthUserRejection::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

async fn lookup_user(parts: &Parts) -> Result<Option<AuthUser>, AuthUserRejection> {
    get_user(&parts.headers)
        .await
        .map(|user| user.map(AuthUser::from))
        .map_err(|e| {
            tracing::error!("Failed to load session user: {e}");
            AuthUserRejection::Internal
        })
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthUserRejection;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        match lookup_user(parts).await? {
            Some(user) => Ok(user),
            None => {
                let redirect_to = requested_path(&parts.uri, parts.extensions.get::<OriginalUri>());
                Err(AuthUserRejection::Login(LoginRedirect::new(
                    login_redirect_location(&redirect_to),
                )))
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthUserRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        lookup_user(parts).await
    }
}
