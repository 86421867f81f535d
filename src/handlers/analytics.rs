//! Analytics handlers: list, create, read, update, delete. Each is a single store call.

use crate::error::AppError;
use crate::handlers::from_body;
use crate::model::{AnalyticsPatch, AnalyticsRecord, NewAnalytics};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AnalyticsRecord>>, AppError> {
    Ok(Json(state.store.list_analytics().await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<AnalyticsRecord>), AppError> {
    let input: NewAnalytics = from_body(body)?;
    let record = state.store.create_analytics(input).await?;
    tracing::debug!(id = %record.id, "analytics created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Responds `null` rather than 404 when the id is unknown.
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<AnalyticsRecord>>, AppError> {
    Ok(Json(state.store.find_analytics(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<AnalyticsRecord>, AppError> {
    let patch: AnalyticsPatch = from_body(body)?;
    let record = state
        .store
        .update_analytics(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(id))?;
    tracing::debug!(id = %record.id, "analytics updated");
    Ok(Json(record))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalyticsRecord>, AppError> {
    let record = state
        .store
        .delete_analytics(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(id))?;
    tracing::debug!(id = %record.id, "analytics deleted");
    Ok(Json(record))
}
