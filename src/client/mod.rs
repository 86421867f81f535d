//! Data-access layer the admin pages use to reach the JSON API.

mod http;

pub use http::HttpClient;

use crate::model::{AnalyticsRecord, NewAnalytics, Restaurant};
use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("analytics record {0} not found")]
    NotFound(String),
}

impl ClientError {
    /// Status to answer a page request with when this error is shown to the user.
    pub fn page_status(&self) -> StatusCode {
        match self {
            ClientError::Status { status, .. } if status.is_client_error() => *status,
            ClientError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// One call per endpoint; no retries and no error translation beyond [`ClientError`].
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn get_analytics(&self) -> Result<Vec<AnalyticsRecord>, ClientError>;

    async fn create_analytics(&self, input: &NewAnalytics) -> Result<AnalyticsRecord, ClientError>;

    async fn update_analytics_by_id(
        &self,
        id: &str,
        record: &AnalyticsRecord,
    ) -> Result<AnalyticsRecord, ClientError>;

    /// `Ok(None)` when the API answers `null`.
    async fn get_analytics_by_id(&self, id: &str) -> Result<Option<AnalyticsRecord>, ClientError>;

    async fn delete_analytics_by_id(&self, id: &str) -> Result<AnalyticsRecord, ClientError>;

    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_status_passes_client_errors_through() {
        let e = ClientError::Status {
            status: StatusCode::CONFLICT,
            body: "{}".into(),
        };
        assert_eq!(e.page_status(), StatusCode::CONFLICT);
        let e = ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(e.page_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ClientError::NotFound("x".into()).page_status(), StatusCode::NOT_FOUND);
    }
}
