use axum::{extract::Query, response::Html};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginPageQuery {
    redirect_to: Option<String>,
}

/// Bare login/register form posting to the session router's `/login`
///
/// `redirectTo` is narrowed to the allow-list before it is embedded.
pub(crate) async fn login_page(Query(query): Query<LoginPageQuery>) -> Html<String> {
    let redirect_to =
        jokes_auth_axum::validate_url(query.redirect_to.as_deref().unwrap_or_default());

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Login</title></head>
<body>
<h1>Login</h1>
<form method="post" action="/login">
  <input type="hidden" name="redirectTo" value="{redirect_to}">
  <fieldset>
    <legend>Login or Register?</legend>
    <label><input type="radio" name="loginType" value="login" checked> Login</label>
    <label><input type="radio" name="loginType" value="register"> Register</label>
  </fieldset>
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Submit</button>
</form>
</body>
</html>
"#
    ))
}
