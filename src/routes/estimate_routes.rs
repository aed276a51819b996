use axum::{
    Router,
    routing::{get, post},
};

use crate::controllers::estimate_controller::{
    create_estimate, get_health, get_offline_mode, set_offline_mode,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router. Every handler extracts `State<AppState>`,
/// so a single `.with_state` covers the whole surface.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(create_estimate))
        .route("/health", get(get_health))
        .route("/settings/offline-mode", get(get_offline_mode).post(set_offline_mode))
        .with_state(state)
}
