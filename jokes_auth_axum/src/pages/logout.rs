use axum::response::Response;

use jokes_auth::destroy_session;

use crate::error::IntoResponseError;
use crate::session::SessionResponse;

/// Clears the session cookie and redirects to the login page
pub(super) async fn logout() -> Result<SessionResponse, Response> {
    destroy_session().map(SessionResponse).into_response_error()
}
