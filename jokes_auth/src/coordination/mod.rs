//! Login form coordination
//!
//! Ties the credential verifier and the session manager together for the
//! login page's combined login/register form.

mod errors;
mod login;

pub use errors::CoordinationError;
pub use login::{FieldErrors, LoginFields, LoginForm, LoginFormError, LoginType, login_action};
