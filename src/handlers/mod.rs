//! HTTP handlers: the JSON API and the admin pages.

pub mod analytics;
pub mod pages;
pub mod restaurants;

use crate::error::AppError;
use axum::http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fallback for verbs a route does not serve.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}

fn from_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))
}
