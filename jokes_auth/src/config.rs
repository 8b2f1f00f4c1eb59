//! Central configuration for the jokes_auth crate

use std::sync::LazyLock;

/// Login entry point that anonymous requests are sent to
///
/// Default: "/login"
pub static LOGIN_URL: LazyLock<String> =
    LazyLock::new(|| std::env::var("LOGIN_URL").unwrap_or_else(|_| "/login".to_string()));

/// Destination used when a requested post-login redirect is not allowed
///
/// Default: "/jokes"
pub static DEFAULT_REDIRECT: LazyLock<String> =
    LazyLock::new(|| std::env::var("DEFAULT_REDIRECT").unwrap_or_else(|_| "/jokes".to_string()));

/// Destinations a post-login redirect may target
///
/// Comma-separated in `REDIRECT_ALLOW_LIST`.
/// Default: "/jokes", "/", "https://remix.run"
pub static REDIRECT_ALLOW_LIST: LazyLock<Vec<String>> = LazyLock::new(|| {
    parse_allow_list(std::env::var("REDIRECT_ALLOW_LIST").ok().as_deref())
});

fn parse_allow_list(value: Option<&str>) -> Vec<String> {
    match value {
        Some(list) if !list.trim().is_empty() => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![
            "/jokes".to_string(),
            "/".to_string(),
            "https://remix.run".to_string(),
        ],
    }
}
