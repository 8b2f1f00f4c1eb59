use thiserror::Error;

use crate::credential::CredentialError;
use crate::session::SessionError;
use crate::userdb::UserError;

use super::login::LoginFormError;

/// Errors from the login form action
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// The submitted form was rejected; the payload is shown back to the user
    #[error("Invalid login form")]
    InvalidForm(LoginFormError),

    /// Error from credential verification or registration
    #[error("Credential error: {0}")]
    CredentialError(CredentialError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),
}

impl CoordinationError {
    /// Whether this is a rejected form rather than a server-side failure
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::InvalidForm(_))
    }
}

// Server-side failures are logged as they are converted

impl From<CredentialError> for CoordinationError {
    fn from(err: CredentialError) -> Self {
        let error = Self::CredentialError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<LoginFormError> for CoordinationError {
    fn from(err: LoginFormError) -> Self {
        Self::InvalidForm(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CoordinationError>();
    }

    #[test]
    fn test_error_display() {
        let err = CoordinationError::from(UserError::Storage("db down".to_string()));
        assert_eq!(err.to_string(), "User error: Storage error: db down");

        let err = CoordinationError::from(CredentialError::InvalidHash);
        assert_eq!(
            err.to_string(),
            "Credential error: Stored password hash is malformed"
        );
    }

    #[test]
    fn test_is_bad_request() {
        let err = CoordinationError::from(LoginFormError::form("Login type invalid"));
        assert!(err.is_bad_request());

        let err = CoordinationError::from(SessionError::Crypto("x".to_string()));
        assert!(!err.is_bad_request());
    }
}
