pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Report API
        .route("/api/v1/reports/options", get(handlers::handle_options))
        .route("/api/v1/reports", post(handlers::handle_generate))
        .route(
            "/api/v1/reports/form",
            post(handlers::handle_generate_form)
                .layer(DefaultBodyLimit::max(handlers::MAX_FORM_BYTES)),
        )
        .with_state(state)
}
