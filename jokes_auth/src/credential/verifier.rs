use crate::userdb::{PublicUser, User, UserStore};

use super::errors::CredentialError;
use super::password::{hash_password, run_blocking, verify_password};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Check a username against the minimum length rule
///
/// Returns the message to show next to the field, or `None` when valid.
pub fn validate_username(username: &str) -> Option<&'static str> {
    (username.chars().count() < MIN_USERNAME_LEN)
        .then_some("Usernames must be at least 3 characters long")
}

/// Check a password against the minimum length rule
pub fn validate_password(password: &str) -> Option<&'static str> {
    (password.chars().count() < MIN_PASSWORD_LEN)
        .then_some("Passwords must be at least 6 characters long")
}

/// Verify a username/password pair
///
/// Unknown usernames and wrong passwords both yield `Ok(None)`. Only
/// storage or hashing failures are errors.
#[tracing::instrument(skip(password))]
pub async fn login(username: &str, password: &str) -> Result<Option<PublicUser>, CredentialError> {
    let Some(user) = UserStore::get_user_by_username(username).await? else {
        tracing::debug!("Login for unknown username");
        return Ok(None);
    };

    let password = password.to_string();
    let stored_hash = user.password_hash.clone();
    let matched = run_blocking(move || verify_password(&password, &stored_hash)).await?;

    if !matched {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Ok(None);
    }

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Some(user.into()))
}

/// Hash the password and store a new user
///
/// The caller checks for an existing username first. The check and this
/// insert are not atomic; a concurrent registration of the same name loses
/// at the database `UNIQUE` constraint and surfaces as
/// [`UserError::Conflict`](crate::UserError::Conflict).
#[tracing::instrument(skip(password))]
pub async fn register(username: &str, password: &str) -> Result<PublicUser, CredentialError> {
    let password = password.to_string();
    let password_hash = run_blocking(move || hash_password(&password)).await?;

    let user = UserStore::create_user(User::new(username.to_string(), password_hash)).await?;
    Ok(user.into())
}
