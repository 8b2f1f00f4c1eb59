//! jokes_auth - Credentials and cookie sessions for the jokes application
//!
//! This crate verifies username/password pairs against stored password hashes
//! and keeps the authenticated user id in an encrypted, tamper-evident cookie.
//! It has no server-side session storage: the only persistent state is the
//! users table.

mod config;
mod coordination;
mod credential;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{DEFAULT_REDIRECT, LOGIN_URL, REDIRECT_ALLOW_LIST};

pub use coordination::{
    CoordinationError, FieldErrors, LoginFields, LoginForm, LoginFormError, LoginType,
    login_action,
};

pub use credential::{CredentialError, login, register, validate_password, validate_username};

pub use session::{
    SESSION_COOKIE_NAME, SessionError, SessionGate, SessionRedirect, UserId, create_session,
    destroy_session, get_session_user_id, get_user, login_redirect_location,
    require_session_user_id, validate_url,
};

pub use userdb::{PublicUser, UserError};

/// Initialize the persistent store used by the credential verifier
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    Ok(())
}
