use chrono::{DateTime, Utc};
use http::header::{COOKIE, HeaderMap};

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::utils::{CookieAttributes, header_set_cookie};

/// Find the session cookie value in the request's `Cookie` headers
///
/// A header that is not valid visible ASCII is skipped rather than treated
/// as an error; the request is simply anonymous.
pub(super) fn get_session_cookie_from_headers(headers: &HeaderMap) -> Option<&str> {
    let cookie_name = SESSION_COOKIE_NAME.as_str();

    let value = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| match header.to_str() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!("Ignoring unreadable cookie header: {e}");
                None
            }
        })
        .flat_map(|s| s.split(';'))
        .map(str::trim)
        .find_map(|pair| match pair.split_once('=') {
            Some((k, v)) if k == cookie_name => Some(v),
            _ => None,
        });

    if value.is_none() {
        tracing::debug!("No session cookie '{cookie_name}' found");
    }
    value
}

pub(super) fn set_session_cookie(
    headers: &mut HeaderMap,
    token: &str,
    secure: bool,
) -> Result<(), SessionError> {
    header_set_cookie(
        headers,
        SESSION_COOKIE_NAME.as_str(),
        token,
        CookieAttributes {
            max_age: *SESSION_COOKIE_MAX_AGE as i64,
            expires_at: None,
            secure,
        },
    )?;
    Ok(())
}

/// Replace the session cookie with an empty one that has already expired
pub(super) fn clear_session_cookie(
    headers: &mut HeaderMap,
    secure: bool,
) -> Result<(), SessionError> {
    header_set_cookie(
        headers,
        SESSION_COOKIE_NAME.as_str(),
        "",
        CookieAttributes {
            max_age: 0,
            expires_at: DateTime::<Utc>::from_timestamp(0, 0),
            secure,
        },
    )?;
    Ok(())
}
