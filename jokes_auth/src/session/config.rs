use std::env;
use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("RJ_session".to_string())
});

pub(crate) static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * 60 * 24 * 30) // 30 days
});

/// Cookie encryption secrets, newest first
///
/// The first secret encrypts new cookies. Every secret is tried when
/// decrypting, so a retired secret can stay in the list until the cookies
/// it issued have expired.
pub(super) static SESSION_SECRETS: LazyLock<Vec<Vec<u8>>> =
    LazyLock::new(|| parse_secrets(env::var("SESSION_SECRETS").ok().as_deref()));

/// Whether the session cookie carries the `Secure` attribute
///
/// `SESSION_COOKIE_SECURE` wins when set; otherwise `APP_ENV=production`
/// turns it on.
pub(super) static SESSION_COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    parse_secure_flag(
        env::var("SESSION_COOKIE_SECURE").ok().as_deref(),
        env::var("APP_ENV").ok().as_deref(),
    )
});

fn parse_secrets(value: Option<&str>) -> Vec<Vec<u8>> {
    let secrets: Vec<Vec<u8>> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.as_bytes().to_vec())
        .collect();

    if secrets.is_empty() {
        tracing::warn!("SESSION_SECRETS not set, using the built-in development secret");
        return vec![b"default_secret_key_change_in_production".to_vec()];
    }
    secrets
}

fn parse_secure_flag(explicit: Option<&str>, app_env: Option<&str>) -> bool {
    match explicit.map(|s| s.trim().to_ascii_lowercase()) {
        Some(v) if v == "true" || v == "1" => true,
        Some(v) if v == "false" || v == "0" => false,
        _ => app_env.is_some_and(|e| e.trim().eq_ignore_ascii_case("production")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secrets_default() {
        let default = vec![b"default_secret_key_change_in_production".to_vec()];
        assert_eq!(parse_secrets(None), default);
        assert_eq!(parse_secrets(Some("")), default);
        assert_eq!(parse_secrets(Some(" , ,")), default);
    }

    #[test]
    fn test_parse_secrets_keeps_order() {
        let secrets = parse_secrets(Some("newest, older ,oldest"));
        assert_eq!(
            secrets,
            vec![b"newest".to_vec(), b"older".to_vec(), b"oldest".to_vec()]
        );
    }

    #[test]
    fn test_secure_flag_follows_app_env() {
        assert!(parse_secure_flag(None, Some("production")));
        assert!(parse_secure_flag(None, Some("PRODUCTION")));
        assert!(!parse_secure_flag(None, Some("development")));
        assert!(!parse_secure_flag(None, None));
    }

    #[test]
    fn test_secure_flag_explicit_override() {
        assert!(parse_secure_flag(Some("true"), Some("development")));
        assert!(!parse_secure_flag(Some("false"), Some("production")));
        // Unrecognised values fall back to APP_ENV
        assert!(parse_secure_flag(Some("maybe"), Some("production")));
    }
}
