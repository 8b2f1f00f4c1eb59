use thiserror::Error;

use crate::userdb::UserError;

#[derive(Debug, Error, Clone)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored password hash is malformed")]
    InvalidHash,

    /// Error from user database operations
    #[error("User error: {0}")]
    User(#[from] UserError),
}
