use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use jokes_auth::{CoordinationError, CredentialError, SessionError, UserError};

/// Helper trait for converting library errors into responses
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, Response>;
}

fn user_error_status(err: &UserError) -> StatusCode {
    match err {
        UserError::Conflict(_) => StatusCode::CONFLICT,
        UserError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Rejected forms become 400 with the form error as JSON
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, Response> {
        self.map_err(|e| match e {
            CoordinationError::InvalidForm(form_error) => {
                (StatusCode::BAD_REQUEST, Json(form_error)).into_response()
            }
            CoordinationError::UserError(ref err)
            | CoordinationError::CredentialError(CredentialError::User(ref err))
            | CoordinationError::SessionError(SessionError::User(ref err)) => {
                (user_error_status(err), e.to_string()).into_response()
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, Response> {
        self.map_err(|e| {
            let status = match &e {
                SessionError::User(err) => user_error_status(err),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string()).into_response()
        })
    }
}
