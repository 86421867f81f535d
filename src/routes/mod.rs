//! Route assembly.

pub mod api;
pub mod common;
pub mod pages;

pub use api::api_routes;
pub use common::common_routes_with_ready;
pub use pages::page_routes;

use crate::state::{AppState, PageState};
use axum::Router;
use tower_http::trace::TraceLayer;

/// The whole application: common routes, the JSON API under `/api`, and the admin pages.
pub fn app(state: AppState, pages: PageState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", api_routes(state, body_limit))
        .merge(page_routes(pages))
        .layer(TraceLayer::new_for_http())
}
