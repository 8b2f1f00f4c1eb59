//! Shared test initialization
//!
//! Loads `.env_test` once per test binary and makes sure the users table
//! exists in the configured store (an in-memory SQLite database by default).

use std::sync::Once;

pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });

    if let Err(e) = crate::userdb::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
}

/// A username that will not collide with other tests sharing the database
pub(crate) fn unique_username(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &suffix[..12])
}
