//! Credential verifier
//!
//! Checks username/password pairs against stored password hashes and
//! registers new users. An unknown username or a wrong password is an
//! expected outcome and comes back as `Ok(None)`.

mod errors;
mod password;
mod verifier;

pub use errors::CredentialError;
pub use verifier::{login, register, validate_password, validate_username};
