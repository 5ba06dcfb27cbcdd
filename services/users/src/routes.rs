//! Users service routes

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Create the router for the users service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/user", get(handlers::index).post(handlers::store))
        .route(
            "/user/:id",
            get(handlers::show)
                .put(handlers::update)
                .patch(handlers::update)
                .delete(handlers::destroy),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
