//! Session manager
//!
//! The authenticated user id lives in an AES-GCM encrypted cookie. There is
//! no server-side session record: a cookie that fails to decrypt, or is
//! missing, means the request is anonymous.

mod config;
mod errors;
mod main;
mod types;

pub use config::SESSION_COOKIE_NAME;
pub use errors::SessionError;
pub use main::{
    create_session, destroy_session, get_session_user_id, get_user, login_redirect_location,
    require_session_user_id, validate_url,
};
pub use types::{SessionGate, SessionRedirect, UserId};
