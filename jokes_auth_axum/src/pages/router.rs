use axum::{
    Router,
    routing::{get, post},
};

/// Routes for the login form and logout
pub(crate) fn router() -> Router<()> {
    Router::new()
        .route("/login", post(super::login::login))
        .route(
            "/logout",
            post(super::logout::logout).get(super::logout::logout),
        )
}
