use crate::config::{DEFAULT_REDIRECT, LOGIN_URL, REDIRECT_ALLOW_LIST};

/// Return `url` if it is an allowed post-login destination, otherwise the
/// default destination
///
/// Matching is exact: `/jokes/123` is not allowed just because `/jokes` is.
pub fn validate_url(url: &str) -> String {
    validate_url_against(url, &REDIRECT_ALLOW_LIST, DEFAULT_REDIRECT.as_str())
}

fn validate_url_against(url: &str, allow_list: &[String], default: &str) -> String {
    if allow_list.iter().any(|allowed| allowed == url) {
        url.to_string()
    } else {
        tracing::debug!(requested = %url, "Redirect target not allowed, using default");
        default.to_string()
    }
}

/// Location of the login page that returns the user to `redirect_to`
pub fn login_redirect_location(redirect_to: &str) -> String {
    format!(
        "{}?redirectTo={}",
        LOGIN_URL.as_str(),
        urlencoding::encode(redirect_to)
    )
}
