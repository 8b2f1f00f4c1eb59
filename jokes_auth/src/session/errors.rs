use thiserror::Error;

use crate::userdb::UserError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Header error: {0}")]
    HeaderError(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),

    /// Error from user database operations
    #[error("User error: {0}")]
    User(#[from] UserError),
}
