use axum::{Form, response::Response};

use jokes_auth::{LoginForm, login_action};

use crate::error::IntoResponseError;
use crate::session::SessionResponse;

/// Handles the combined login/register form
///
/// Success redirects with a fresh session cookie; a rejected form is a 400
/// carrying `{fieldErrors, fields, formError}`.
pub(super) async fn login(Form(form): Form<LoginForm>) -> Result<SessionResponse, Response> {
    login_action(form)
        .await
        .map(SessionResponse)
        .into_response_error()
}
