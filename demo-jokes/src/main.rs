use axum::{Router, response::IntoResponse, routing::get};
use http::{StatusCode, header::LOCATION};

use jokes_auth_axum::jokes_auth_router;

mod jokes;
mod login_page;
mod server;

use crate::{
    jokes::{JokeBook, router as jokes_router},
    server::{init_tracing, port_from_env, spawn_http_server},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    jokes_auth_axum::init().await?;

    let app = Router::new()
        .route(
            "/",
            get(|| async { (StatusCode::FOUND, [(LOCATION, "/jokes")]).into_response() }),
        )
        .route("/login", get(login_page::login_page))
        .merge(jokes_auth_router())
        .nest("/jokes", jokes_router(JokeBook::default()));

    spawn_http_server(port_from_env(), app).await??;
    Ok(())
}
