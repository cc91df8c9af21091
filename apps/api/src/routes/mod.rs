pub mod health;

use axum::{routing::get, Router};

use crate::activity::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/team-activity",
            get(handlers::handle_team_activity),
        )
        .with_state(state)
}
