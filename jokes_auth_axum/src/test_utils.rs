//! Shared test initialization

use axum::body::{Body, to_bytes};
use http::{HeaderValue, Request, Response, header};
use std::sync::Once;

pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if let Err(e) = dotenvy::from_filename(".env_test") {
            eprintln!("Warning: .env_test not loaded: {e}");
        }
    });

    if let Err(e) = jokes_auth::init().await {
        eprintln!("Warning: Failed to initialize jokes_auth: {e}");
    }
}

/// The `Cookie` request header value a browser would send back
pub(crate) fn cookie_from_response<B>(response: &Response<B>) -> Option<HeaderValue> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    HeaderValue::from_str(pair).ok()
}

pub(crate) fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub(crate) fn unique_username(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}{nanos}")
}
