//! Router for the session endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create a router for the login form action and logout
///
/// Routes:
/// - `POST /login`: login or register, then redirect with a session cookie
/// - `POST /logout`, `GET /logout`: clear the session and redirect to the login page
///
/// Request headers are not recorded in the trace spans since they carry the
/// session cookie.
pub fn jokes_auth_router() -> Router {
    super::pages::router().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`jokes_auth_router`] without the HTTP tracing layer
pub fn jokes_auth_router_no_trace() -> Router {
    super::pages::router()
}
