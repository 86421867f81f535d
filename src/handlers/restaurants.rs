//! Restaurant handlers backing the restaurant selector on the analytics forms.

use crate::error::AppError;
use crate::handlers::from_body;
use crate::model::{NewRestaurant, Restaurant};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Restaurant>>, AppError> {
    Ok(Json(state.store.list_restaurants().await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Restaurant>), AppError> {
    let input: NewRestaurant = from_body(body)?;
    let restaurant = state.store.create_restaurant(input).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}
