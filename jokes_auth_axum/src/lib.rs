//! jokes_auth_axum - Axum integration for jokes_auth
//!
//! Provides extractors and middleware that turn the session manager's
//! redirect outcome into a `302` to the login page, plus a router with the
//! login form action and logout endpoints.

mod error;
mod middleware;
mod pages;
mod router;
mod session;

#[cfg(test)]
mod test_utils;

pub use error::IntoResponseError;
pub use middleware::require_session;
pub use router::{jokes_auth_router, jokes_auth_router_no_trace};
pub use session::{AuthUser, AuthUserRejection, LoginRedirect, SessionResponse, SessionUserId};

pub use jokes_auth::{
    LOGIN_URL, SessionGate, UserId, init, login_redirect_location, require_session_user_id,
    validate_url,
};
