use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::credential::{login, register, validate_password, validate_username};
use crate::session::{SessionRedirect, create_session, validate_url};
use crate::userdb::UserStore;

use super::errors::CoordinationError;

/// The login page form as submitted by the browser
///
/// Every field is optional so that a malformed submission can be answered
/// with a form error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    Login,
    Register,
}

impl FromStr for LoginType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(LoginType::Login),
            "register" => Ok(LoginType::Register),
            _ => Err(()),
        }
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Submitted values echoed back so the form can be refilled
///
/// The password is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
    pub username: String,
    pub login_type: String,
}

/// Body of a rejected login form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFormError {
    pub field_errors: Option<FieldErrors>,
    pub fields: Option<LoginFields>,
    pub form_error: Option<String>,
}

impl LoginFormError {
    pub(crate) fn form(message: &str) -> Self {
        Self {
            form_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn with_fields(mut self, fields: &LoginFields) -> Self {
        self.fields = Some(fields.clone());
        self
    }
}

/// Handle a login/register form submission
///
/// On success the returned redirect sets the session cookie and sends the
/// browser to the validated `redirectTo` target. A rejected submission comes
/// back as [`CoordinationError::InvalidForm`].
///
/// Registration checks for an existing username before inserting; the check
/// and the insert are not atomic.
#[tracing::instrument(skip(form), fields(login_type = ?form.login_type, username = ?form.username))]
pub async fn login_action(form: LoginForm) -> Result<SessionRedirect, CoordinationError> {
    let redirect_to = validate_url(form.redirect_to.as_deref().unwrap_or_default());

    let (Some(login_type), Some(username), Some(password)) =
        (form.login_type, form.username, form.password)
    else {
        return Err(LoginFormError::form("Form not submitted correctly.").into());
    };

    let fields = LoginFields {
        username,
        login_type,
    };

    let field_errors = FieldErrors {
        username: validate_username(&fields.username).map(str::to_string),
        password: validate_password(&password).map(str::to_string),
    };

    if !field_errors.is_empty() {
        return Err(LoginFormError {
            field_errors: Some(field_errors),
            fields: Some(fields),
            form_error: None,
        }
        .into());
    }

    let user = match fields.login_type.parse::<LoginType>() {
        Ok(LoginType::Login) => match login(&fields.username, &password).await? {
            Some(user) => user,
            None => {
                tracing::info!("Login rejected");
                return Err(LoginFormError::form("Invalid username or password")
                    .with_fields(&fields)
                    .into());
            }
        },
        Ok(LoginType::Register) => {
            if UserStore::get_user_by_username(&fields.username)
                .await?
                .is_some()
            {
                return Err(LoginFormError {
                    field_errors: Some(FieldErrors {
                        username: Some("Username already exists".to_string()),
                        password: None,
                    }),
                    fields: Some(fields),
                    form_error: None,
                }
                .into());
            }
            register(&fields.username, &password).await?
        }
        Err(()) => {
            return Err(LoginFormError::form("Login type invalid")
                .with_fields(&fields)
                .into());
        }
    };

    Ok(create_session(&user.id, &redirect_to)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::get_session_user_id;
    use crate::test_utils::{init_test_environment, unique_username};
    use http::HeaderValue;
    use http::header::{COOKIE, HeaderMap, SET_COOKIE};
    use serial_test::serial;

    fn form(login_type: &str, username: &str, password: &str) -> LoginForm {
        LoginForm {
            login_type: Some(login_type.to_string()),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            redirect_to: None,
        }
    }

    fn expect_form_error(result: Result<SessionRedirect, CoordinationError>) -> LoginFormError {
        match result {
            Err(CoordinationError::InvalidForm(err)) => err,
            Err(other) => panic!("Expected InvalidForm, got {other:?}"),
            Ok(redirect) => panic!("Expected InvalidForm, got redirect to {}", redirect.location),
        }
    }

    fn session_user_id(redirect: &SessionRedirect) -> Option<String> {
        let set_cookie = redirect.headers.get(SET_COOKIE)?.to_str().ok()?;
        let pair = set_cookie.split(';').next()?;
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(pair).ok()?);
        get_session_user_id(&headers).map(|id| id.into_inner())
    }

    #[test]
    fn test_login_type_parse() {
        assert_eq!("login".parse::<LoginType>(), Ok(LoginType::Login));
        assert_eq!("register".parse::<LoginType>(), Ok(LoginType::Register));
        assert!("Login".parse::<LoginType>().is_err());
        assert!("admin".parse::<LoginType>().is_err());
    }

    #[test]
    fn test_login_form_deserializes_camel_case() {
        let form: LoginForm = serde_json::from_value(serde_json::json!({
            "loginType": "login",
            "username": "kody",
            "password": "twixrox",
            "redirectTo": "/jokes"
        }))
        .unwrap();
        assert_eq!(form.login_type.as_deref(), Some("login"));
        assert_eq!(form.redirect_to.as_deref(), Some("/jokes"));
    }

    #[test]
    fn test_form_error_serializes_nulls() {
        let json = serde_json::to_value(LoginFormError::form("Login type invalid")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fieldErrors": null,
                "fields": null,
                "formError": "Login type invalid"
            })
        );
    }

    #[tokio::test]
    async fn test_missing_fields_is_form_error() {
        let mut incomplete = form("login", "kody", "twixrox");
        incomplete.password = None;

        let err = expect_form_error(login_action(incomplete).await);
        assert_eq!(err, LoginFormError::form("Form not submitted correctly."));
    }

    #[tokio::test]
    async fn test_short_fields_are_field_errors() {
        let err = expect_form_error(login_action(form("login", "ab", "12345")).await);

        assert_eq!(
            err.field_errors,
            Some(FieldErrors {
                username: Some("Usernames must be at least 3 characters long".to_string()),
                password: Some("Passwords must be at least 6 characters long".to_string()),
            })
        );
        assert_eq!(err.form_error, None);

        let fields = serde_json::to_value(&err.fields).unwrap();
        assert_eq!(
            fields,
            serde_json::json!({"username": "ab", "loginType": "login"})
        );
    }

    #[tokio::test]
    async fn test_unknown_login_type() {
        let err = expect_form_error(login_action(form("admin", "kody", "twixrox")).await);
        assert_eq!(err.form_error.as_deref(), Some("Login type invalid"));
        assert!(err.fields.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_register_then_login_via_form() {
        init_test_environment().await;
        let username = unique_username("form");

        let mut registration = form("register", &username, "twixrox");
        registration.redirect_to = Some("/".to_string());
        let redirect = login_action(registration).await.unwrap();
        assert_eq!(redirect.location, "/");
        let registered_id = session_user_id(&redirect).unwrap();

        let redirect = login_action(form("login", &username, "twixrox"))
            .await
            .unwrap();
        assert_eq!(session_user_id(&redirect), Some(registered_id.clone()));

        UserStore::delete_user(&registered_id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_untrusted_redirect_uses_default() {
        init_test_environment().await;
        let username = unique_username("evil");

        let mut registration = form("register", &username, "twixrox");
        registration.redirect_to = Some("https://evil.example".to_string());
        let redirect = login_action(registration).await.unwrap();
        assert_eq!(redirect.location, validate_url("https://evil.example"));
        assert_ne!(redirect.location, "https://evil.example");

        let user_id = session_user_id(&redirect).unwrap();
        UserStore::delete_user(&user_id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_wrong_password_is_form_error() {
        init_test_environment().await;
        let username = unique_username("wrong");

        let redirect = login_action(form("register", &username, "twixrox"))
            .await
            .unwrap();
        let user_id = session_user_id(&redirect).unwrap();

        let err = expect_form_error(login_action(form("login", &username, "nottwix")).await);
        assert_eq!(err.form_error.as_deref(), Some("Invalid username or password"));
        assert_eq!(err.field_errors, None);

        UserStore::delete_user(&user_id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_user_is_form_error() {
        init_test_environment().await;

        let err = expect_form_error(
            login_action(form("login", &unique_username("nobody"), "twixrox")).await,
        );
        assert_eq!(err.form_error.as_deref(), Some("Invalid username or password"));
    }

    #[tokio::test]
    #[serial]
    async fn test_register_existing_username_is_field_error() {
        init_test_environment().await;
        let username = unique_username("taken");

        let redirect = login_action(form("register", &username, "twixrox"))
            .await
            .unwrap();
        let user_id = session_user_id(&redirect).unwrap();

        let err = expect_form_error(login_action(form("register", &username, "another")).await);
        assert_eq!(
            err.field_errors,
            Some(FieldErrors {
                username: Some("Username already exists".to_string()),
                password: None,
            })
        );

        UserStore::delete_user(&user_id).await.unwrap();
    }
}
