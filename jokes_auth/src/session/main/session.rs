use http::HeaderValue;
use http::header::{HeaderMap, LOCATION};

use crate::config::LOGIN_URL;
use crate::session::config::{SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE, SESSION_SECRETS};
use crate::session::errors::SessionError;
use crate::session::types::{SessionGate, SessionPayload, SessionRedirect, UserId};
use crate::userdb::{PublicUser, UserStore};

use super::cookie::{clear_session_cookie, get_session_cookie_from_headers, set_session_cookie};
use super::redirect::login_redirect_location;
use super::token::{open_payload, seal_payload};

fn redirect_with_headers(
    location: &str,
    mut headers: HeaderMap,
) -> Result<SessionRedirect, SessionError> {
    let value = HeaderValue::from_str(location)
        .map_err(|_| SessionError::HeaderError(format!("Invalid redirect location: {location}")))?;
    headers.insert(LOCATION, value);

    Ok(SessionRedirect {
        location: location.to_string(),
        headers,
    })
}

/// Start a session for `user_id` and redirect to `redirect_to`
///
/// `redirect_to` is used as given; pass it through
/// [`validate_url`](super::validate_url) first when it comes from the client.
#[tracing::instrument]
pub fn create_session(user_id: &str, redirect_to: &str) -> Result<SessionRedirect, SessionError> {
    let secret = SESSION_SECRETS
        .first()
        .ok_or_else(|| SessionError::Crypto("No session secret configured".to_string()))?;

    let token = seal_payload(
        secret,
        SESSION_COOKIE_NAME.as_str(),
        &SessionPayload::for_user(user_id),
    )?;

    let mut headers = HeaderMap::new();
    set_session_cookie(&mut headers, &token, *SESSION_COOKIE_SECURE)?;

    tracing::info!("Session created");
    redirect_with_headers(redirect_to, headers)
}

/// The user id carried by the request's session cookie, if any
///
/// Missing, malformed, tampered or foreign cookies all read as anonymous.
pub fn get_session_user_id(headers: &HeaderMap) -> Option<UserId> {
    let token = get_session_cookie_from_headers(headers)?;
    if token.is_empty() {
        return None;
    }

    let user_id = open_payload(&SESSION_SECRETS, SESSION_COOKIE_NAME.as_str(), token)
        .and_then(SessionPayload::into_user_id);

    if user_id.is_none() {
        tracing::debug!("Session cookie present but not valid, treating as anonymous");
    }
    user_id
}

/// Gate a protected operation on an authenticated session
///
/// An anonymous request gets [`SessionGate::RedirectRequired`] pointing at
/// the login page with `redirect_to` (normally the current path)
/// in its `redirectTo` parameter.
pub fn require_session_user_id(headers: &HeaderMap, redirect_to: &str) -> SessionGate {
    match get_session_user_id(headers) {
        Some(user_id) => SessionGate::Authenticated(user_id),
        None => {
            tracing::debug!(redirect_to, "Anonymous request to protected resource");
            SessionGate::RedirectRequired(login_redirect_location(redirect_to))
        }
    }
}

/// The user behind the request's session
///
/// `Ok(None)` when the request is anonymous or the user no longer exists.
pub async fn get_user(headers: &HeaderMap) -> Result<Option<PublicUser>, SessionError> {
    let Some(user_id) = get_session_user_id(headers) else {
        return Ok(None);
    };

    let user = UserStore::get_user(user_id.as_str()).await?;
    if user.is_none() {
        tracing::debug!(%user_id, "Session refers to a user that no longer exists");
    }

    Ok(user.map(PublicUser::from))
}

/// End the session and redirect to the login page
#[tracing::instrument]
pub fn destroy_session() -> Result<SessionRedirect, SessionError> {
    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers, *SESSION_COOKIE_SECURE)?;

    tracing::info!("Session destroyed");
    redirect_with_headers(LOGIN_URL.as_str(), headers)
}
