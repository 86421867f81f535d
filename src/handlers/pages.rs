//! Admin page handlers. Each page talks to the JSON API only through [`crate::client::AnalyticsApi`].

use crate::cache::Fetched;
use crate::client::ClientError;
use crate::error::AppError;
use crate::model::{AnalyticsRecord, Restaurant};
use crate::state::PageState;
use crate::validation::{FormValidator, FormValues};
use crate::views::{create, edit, FormView, ListView};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

pub const LIST_PATH: &str = "/analytics";
const LIST_KEY: &str = "analytics";
const RESTAURANTS_KEY: &str = "restaurants";

pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

pub async fn list_page(State(ps): State<PageState>) -> Result<Response, AppError> {
    let fetched = ps.lists.fetch(LIST_KEY, ps.api.get_analytics()).await;
    let status = match (&fetched.data, &fetched.error) {
        (None, Some(e)) => e.page_status(),
        _ => StatusCode::OK,
    };
    let html = ps.views.list(&ListView::from_fetched(fetched))?;
    Ok((status, Html(html)).into_response())
}

pub async fn create_page(State(ps): State<PageState>) -> Result<Response, AppError> {
    let today = chrono::Local::now().date_naive();
    let view = create::create_form(create::default_values(today)).with_restaurants(load_restaurants(&ps).await);
    render_form(&ps, StatusCode::OK, &view)
}

pub async fn create_submit(
    State(ps): State<PageState>,
    Form(values): Form<FormValues>,
) -> Result<Response, AppError> {
    let input = match FormValidator::validate(&values) {
        Ok(input) => input,
        Err(errors) => {
            let view = create::create_form(values)
                .with_field_errors(errors)
                .with_restaurants(cached_restaurants(&ps));
            return render_form(&ps, StatusCode::UNPROCESSABLE_ENTITY, &view);
        }
    };
    match ps.api.create_analytics(&input).await {
        Ok(record) => {
            tracing::info!(id = %record.id, "analytics created");
            ps.lists.invalidate(LIST_KEY);
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            let status = e.page_status();
            let view = create::create_form(values)
                .with_error(e)
                .with_restaurants(cached_restaurants(&ps));
            render_form(&ps, status, &view)
        }
    }
}

pub async fn edit_page(
    State(ps): State<PageState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let lookup = async {
        match ps.api.get_analytics_by_id(&id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                // Deleted records must not be served stale from the cache.
                ps.records.invalidate(&id);
                Err(ClientError::NotFound(id.clone()))
            }
            Err(e) => Err(e),
        }
    };
    let fetched = ps.records.fetch(&id, lookup).await;
    let (status, restaurants) = match (&fetched.data, &fetched.error) {
        (None, Some(e)) => (e.page_status(), cached_restaurants(&ps)),
        _ => (StatusCode::OK, load_restaurants(&ps).await),
    };
    let view = edit::edit_from_fetched(&id, fetched).with_restaurants(restaurants);
    render_form(&ps, status, &view)
}

pub async fn edit_submit(
    State(ps): State<PageState>,
    Path(id): Path<String>,
    Form(values): Form<FormValues>,
) -> Result<Response, AppError> {
    let input = match FormValidator::validate(&values) {
        Ok(input) => input,
        Err(errors) => {
            let view = edit::edit_form(&id, values)
                .with_field_errors(errors)
                .with_restaurants(cached_restaurants(&ps));
            return render_form(&ps, StatusCode::UNPROCESSABLE_ENTITY, &view);
        }
    };
    let record = AnalyticsRecord {
        id: id.clone(),
        restaurant_id: input.restaurant_id,
        report_date: input.report_date,
        total_orders: input.total_orders,
        total_revenue: input.total_revenue,
    };
    match ps.api.update_analytics_by_id(&id, &record).await {
        Ok(updated) => {
            tracing::info!(id = %updated.id, "analytics updated");
            ps.records.mutate(&updated.id, updated.clone());
            ps.lists.invalidate(LIST_KEY);
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            let status = e.page_status();
            let view = edit::edit_form(&id, values)
                .with_error(e)
                .with_restaurants(cached_restaurants(&ps));
            render_form(&ps, status, &view)
        }
    }
}

async fn load_restaurants(ps: &PageState) -> Fetched<Vec<Restaurant>, ClientError> {
    ps.restaurants.fetch(RESTAURANTS_KEY, ps.api.get_restaurants()).await
}

/// Selector options without a network round trip.
fn cached_restaurants(ps: &PageState) -> Fetched<Vec<Restaurant>, ClientError> {
    Fetched {
        data: ps.restaurants.get(RESTAURANTS_KEY),
        error: None,
    }
}

fn render_form(ps: &PageState, status: StatusCode, view: &FormView) -> Result<Response, AppError> {
    Ok((status, Html(ps.views.form(view)?)).into_response())
}
