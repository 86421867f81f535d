//! JSON API routes. Unsupported verbs fall through to a 405 handler on every path.

use crate::handlers::{analytics, method_not_allowed, restaurants};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn api_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route(
            "/analytics",
            get(analytics::list)
                .post(analytics::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/analytics/:id",
            get(analytics::read)
                .put(analytics::update)
                .delete(analytics::delete)
                .fallback(method_not_allowed),
        )
        .route(
            "/restaurants",
            get(restaurants::list)
                .post(restaurants::create)
                .fallback(method_not_allowed),
        )
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
