use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::CredentialError;

/// Hash a password with Argon2id and a fresh random salt
///
/// Uses the crate's default cost (m=19 MiB, t=2, p=1), which keeps an
/// interactive login well under a second.
pub(super) fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string
pub(super) fn verify_password(password: &str, hash: &str) -> Result<bool, CredentialError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| CredentialError::InvalidHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Run a hashing closure on the blocking pool
pub(super) async fn run_blocking<T, F>(f: F) -> Result<T, CredentialError>
where
    F: FnOnce() -> Result<T, CredentialError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?
}
