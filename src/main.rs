mod api_docs;
mod config;
mod controllers;
mod models;
mod routes;
mod services;
mod shared_state;

use std::net::SocketAddr;

use axum::{Router, response::Html, routing::get};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::estimate_routes::api_routes;
use crate::shared_state::AppState;

#[tokio::main]
async fn main() {
    // 1. Load configuration — a missing or broken file degrades to defaults,
    //    matching the degrade-not-fail policy of the estimate pipeline.
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config.json ({}), using defaults", e);
            Config::default()
        }
    };
    if config.offline_mode {
        println!("Offline mode enabled: external APIs will not be called");
    }

    // 2. Shared state: config, HTTP client, runtime offline flag.
    let server_port = config.server.port;
    let state = AppState::new(config);

    // 3. HTTP server: JSON API, Scalar docs, static front end.
    let app = Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"));

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    println!("API Server listening on http://{}", addr);
    println!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
