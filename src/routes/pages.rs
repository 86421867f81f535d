//! Admin page routes.

use crate::handlers::pages::{create_page, create_submit, edit_page, edit_submit, index, list_page};
use crate::state::PageState;
use axum::{routing::get, Router};

pub fn page_routes(state: PageState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analytics", get(list_page))
        .route("/analytics/create", get(create_page).post(create_submit))
        .route("/analytics/edit/:id", get(edit_page).post(edit_submit))
        .with_state(state)
}
