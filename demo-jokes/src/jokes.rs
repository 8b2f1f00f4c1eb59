//! Joke routes backed by an in-memory joke book

use axum::{
    Form, Json, Router,
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::{HeaderMap, StatusCode, header::LOCATION};
use ring::rand::SystemRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use jokes_auth_axum::{
    AuthUser, LoginRedirect, SessionGate, SessionUserId, UserId, require_session_user_id,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Joke {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) content: String,
    pub(crate) jokester_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct JokeListItem {
    id: String,
    name: String,
}

#[derive(Clone, Default)]
pub(crate) struct JokeBook {
    jokes: Arc<RwLock<Vec<Joke>>>,
}

impl JokeBook {
    async fn add(&self, name: String, content: String, jokester_id: &UserId) -> Joke {
        let joke = Joke {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            content,
            jokester_id: jokester_id.to_string(),
        };
        self.jokes.write().await.push(joke.clone());
        joke
    }

    async fn get(&self, id: &str) -> Option<Joke> {
        self.jokes.read().await.iter().find(|j| j.id == id).cloned()
    }

    async fn remove(&self, id: &str) {
        self.jokes.write().await.retain(|j| j.id != id);
    }

    async fn random(&self) -> Option<Joke> {
        let jokes = self.jokes.read().await;
        if jokes.is_empty() {
            return None;
        }
        let index = match ring::rand::generate::<[u8; 8]>(&SystemRandom::new()) {
            Ok(bytes) => (u64::from_le_bytes(bytes.expose()) % jokes.len() as u64) as usize,
            Err(_) => {
                tracing::warn!("Random source unavailable, showing the first joke");
                0
            }
        };
        jokes.get(index).cloned()
    }

    async fn latest(&self, count: usize) -> Vec<JokeListItem> {
        self.jokes
            .read()
            .await
            .iter()
            .rev()
            .take(count)
            .map(|j| JokeListItem {
                id: j.id.clone(),
                name: j.name.clone(),
            })
            .collect()
    }
}

pub(crate) fn router(book: JokeBook) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/new", post(new_joke))
        .route("/{id}", get(show_joke).post(joke_action))
        .with_state(book)
}

fn gate(headers: &HeaderMap, uri: &http::Uri) -> Result<UserId, Response> {
    match require_session_user_id(headers, uri.path()) {
        SessionGate::Authenticated(user_id) => Ok(user_id),
        SessionGate::RedirectRequired(location) => {
            Err(LoginRedirect::new(location).into_response())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexData {
    user: Option<UserView>,
    joke_list_items: Vec<JokeListItem>,
    random_joke: Option<Joke>,
}

#[derive(Serialize)]
struct UserView {
    id: String,
    username: String,
}

async fn index(State(book): State<JokeBook>, user: Option<AuthUser>) -> Json<IndexData> {
    Json(IndexData {
        user: user.map(|u| UserView {
            id: u.id,
            username: u.username,
        }),
        joke_list_items: book.latest(5).await,
        random_joke: book.random().await,
    })
}

#[derive(Deserialize)]
struct NewJokeForm {
    name: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
struct JokeFieldErrors {
    name: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JokeFormError {
    field_errors: Option<JokeFieldErrors>,
    fields: Option<JokeFields>,
    form_error: Option<String>,
}

#[derive(Debug, Serialize)]
struct JokeFields {
    name: String,
    content: String,
}

fn validate_joke(name: &str, content: &str) -> Option<JokeFieldErrors> {
    let errors = JokeFieldErrors {
        name: (name.chars().count() < 3).then(|| "That joke's name is too short".to_string()),
        content: (content.chars().count() < 10).then(|| "That joke is too short".to_string()),
    };
    (errors != JokeFieldErrors::default()).then_some(errors)
}

async fn new_joke(
    State(book): State<JokeBook>,
    SessionUserId(user_id): SessionUserId,
    Form(form): Form<NewJokeForm>,
) -> Response {
    let (Some(name), Some(content)) = (form.name, form.content) else {
        let body = JokeFormError {
            field_errors: None,
            fields: None,
            form_error: Some("Form not submitted correctly.".to_string()),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    if let Some(field_errors) = validate_joke(&name, &content) {
        let body = JokeFormError {
            field_errors: Some(field_errors),
            fields: Some(JokeFields { name, content }),
            form_error: None,
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let joke = book.add(name, content, &user_id).await;
    tracing::info!(joke_id = %joke.id, %user_id, "Joke created");
    (StatusCode::FOUND, [(LOCATION, format!("/jokes/{}", joke.id))]).into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JokeData {
    joke: Joke,
    is_owner: bool,
}

async fn show_joke(
    State(book): State<JokeBook>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let Some(joke) = book.get(&id).await else {
        return (StatusCode::NOT_FOUND, format!("Huh? What the heck is \"{id}\"?")).into_response();
    };

    let user_id = match gate(&headers, &uri) {
        Ok(user_id) => user_id,
        Err(redirect) => return redirect,
    };

    let is_owner = joke.jokester_id == user_id.as_str();
    Json(JokeData { joke, is_owner }).into_response()
}

#[derive(Deserialize)]
struct IntentForm {
    intent: Option<String>,
}

async fn joke_action(
    State(book): State<JokeBook>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Form(form): Form<IntentForm>,
) -> Response {
    if form.intent.as_deref() != Some("delete") {
        return (StatusCode::BAD_REQUEST, "Invalid intent").into_response();
    }

    let joke = book.get(&id).await;

    let user_id = match gate(&headers, &uri) {
        Ok(user_id) => user_id,
        Err(redirect) => return redirect,
    };

    let Some(joke) = joke else {
        return (
            StatusCode::NOT_FOUND,
            format!("Can't delete that which does not exist: {id}"),
        )
            .into_response();
    };

    if joke.jokester_id != user_id.as_str() {
        tracing::warn!(joke_id = %id, %user_id, "Refusing to delete another user's joke");
        return (StatusCode::FORBIDDEN, "You can't delete someone else's joke!").into_response();
    }

    book.remove(&id).await;
    tracing::info!(joke_id = %id, %user_id, "Joke deleted");
    (StatusCode::FOUND, [(LOCATION, "/jokes")]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use http::{
        Request,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    };
    use tower::ServiceExt;

    fn app(book: JokeBook) -> Router {
        Router::new().nest("/jokes", router(book))
    }

    fn session_cookie(user_id: &str) -> String {
        let redirect = jokes_auth::create_session(user_id, "/jokes").unwrap();
        let set_cookie = redirect.headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seeded(owner: &str) -> (JokeBook, Joke) {
        let book = JokeBook::default();
        let joke = book
            .add(
                "Road worker".to_string(),
                "I never wanted to believe that my Dad was stealing from his job as a road worker."
                    .to_string(),
                &UserId::new(owner),
            )
            .await;
        (book, joke)
    }

    #[tokio::test]
    async fn test_random_joke_comes_from_book() {
        let (book, first) = seeded("owner").await;
        let second = book
            .add(
                "Frisbee".to_string(),
                "I was wondering why the frisbee was getting bigger".to_string(),
                &UserId::new("owner"),
            )
            .await;

        for _ in 0..20 {
            let picked = book.random().await.unwrap();
            assert!(picked == first || picked == second);
        }
        assert_eq!(JokeBook::default().random().await, None);
    }

    #[tokio::test]
    async fn test_index_anonymous() {
        let (book, joke) = seeded("owner").await;
        let response = app(book).oneshot(get("/jokes", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["user"].is_null());
        assert_eq!(body["randomJoke"]["id"], joke.id.as_str());
        assert_eq!(body["jokeListItems"][0]["name"], "Road worker");
    }

    #[tokio::test]
    async fn test_new_joke_requires_session() {
        let response = app(JokeBook::default())
            .oneshot(post_form("/jokes/new?draft=1", "name=abc&content=long enough", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response.headers().get(LOCATION).unwrap().to_str().unwrap();
        assert!(location.ends_with("?redirectTo=%2Fjokes%2Fnew"));
    }

    #[tokio::test]
    async fn test_new_joke_validation() {
        let cookie = session_cookie("jokester");
        let response = app(JokeBook::default())
            .oneshot(post_form("/jokes/new", "name=ab&content=short", Some(cookie.as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["fieldErrors"]["name"], "That joke's name is too short");
        assert_eq!(body["fieldErrors"]["content"], "That joke is too short");
    }

    #[tokio::test]
    async fn test_new_joke_created_and_owned() {
        let book = JokeBook::default();
        let cookie = session_cookie("jokester");

        let response = app(book.clone())
            .oneshot(post_form(
                "/jokes/new",
                "name=Frisbee&content=I+was+wondering+why+the+frisbee+was+getting+bigger",
                Some(cookie.as_str()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let response = app(book.clone())
            .oneshot(get(&location, Some(cookie.as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["joke"]["name"], "Frisbee");
        assert_eq!(body["joke"]["jokesterId"], "jokester");
        assert_eq!(body["isOwner"], true);

        let other = session_cookie("someone-else");
        let response = app(book).oneshot(get(&location, Some(other.as_str()))).await.unwrap();
        assert_eq!(json_body(response).await["isOwner"], false);
    }

    #[tokio::test]
    async fn test_show_missing_joke_is_404() {
        let cookie = session_cookie("jokester");
        let response = app(JokeBook::default())
            .oneshot(get("/jokes/nope", Some(cookie.as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_invalid_intent_is_400() {
        let (book, joke) = seeded("owner").await;
        let response = app(book)
            .oneshot(post_form(&format!("/jokes/{}", joke.id), "intent=edit", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_anonymous_redirects() {
        let (book, joke) = seeded("owner").await;
        let response = app(book.clone())
            .oneshot(post_form(&format!("/jokes/{}", joke.id), "intent=delete", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(book.get(&joke.id).await.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_is_404() {
        let cookie = session_cookie("owner");
        let response = app(JokeBook::default())
            .oneshot(post_form("/jokes/ghost", "intent=delete", Some(cookie.as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_other_users_joke_is_403() {
        let (book, joke) = seeded("owner").await;
        let cookie = session_cookie("intruder");

        let response = app(book.clone())
            .oneshot(post_form(
                &format!("/jokes/{}", joke.id),
                "intent=delete",
                Some(cookie.as_str()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(book.get(&joke.id).await.is_some());
    }

    #[tokio::test]
    async fn test_delete_own_joke() {
        let (book, joke) = seeded("owner").await;
        let cookie = session_cookie("owner");

        let response = app(book.clone())
            .oneshot(post_form(
                &format!("/jokes/{}", joke.id),
                "intent=delete",
                Some(cookie.as_str()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/jokes");
        assert!(book.get(&joke.id).await.is_none());
    }
}
