use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;
use thiserror::Error;

pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| UtilError::Format("Failed to decode base64url".to_string()))?;
    Ok(decoded)
}

pub(crate) fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub(crate) fn gen_random_bytes<const N: usize>() -> Result<[u8; N], UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = [0u8; N];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(bytes)
}

/// Cookie attributes shared by every session cookie this crate emits
pub(crate) struct CookieAttributes {
    pub(crate) max_age: i64,
    pub(crate) expires_at: Option<DateTime<Utc>>,
    pub(crate) secure: bool,
}

pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    attrs: CookieAttributes,
) -> Result<(), UtilError> {
    let mut cookie = format!(
        "{name}={value}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        attrs.max_age
    );
    if let Some(expires_at) = attrs.expires_at {
        cookie.push_str(&format!(
            "; Expires={}",
            expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
        ));
    }
    if attrs.secure {
        cookie.push_str("; Secure");
    }
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Invalid format: {0}")]
    Format(String),
}
