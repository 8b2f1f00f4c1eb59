use axum::{
    extract::{OriginalUri, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use jokes_auth::{SessionGate, require_session_user_id};

use super::session::{LoginRedirect, requested_path};

/// Redirect anonymous requests to the login page
///
/// For `axum::middleware::from_fn`. Authenticated requests continue with the
/// session's [`UserId`](jokes_auth::UserId) in the request extensions.
pub async fn require_session(mut req: Request, next: Next) -> Response {
    let redirect_to = requested_path(req.uri(), req.extensions().get::<OriginalUri>());

    match require_session_user_id(req.headers(), &redirect_to) {
        SessionGate::Authenticated(user_id) => {
            tracing::debug!(%user_id, "Session verified");
            req.extensions_mut().insert(user_id);
            next.run(req).await
        }
        SessionGate::RedirectRequired(location) => LoginRedirect::new(location).into_response(),
    }
}
