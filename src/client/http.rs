//! [`AnalyticsApi`] over HTTP with reqwest.

use crate::client::{AnalyticsApi, ClientError};
use crate::model::{AnalyticsRecord, NewAnalytics, Restaurant};
use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        HttpClient {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base url.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            body,
        });
    }
    Ok(resp.json::<T>().await?)
}

#[async_trait]
impl AnalyticsApi for HttpClient {
    async fn get_analytics(&self) -> Result<Vec<AnalyticsRecord>, ClientError> {
        let url = self.url(&["api", "analytics"])?;
        tracing::debug!(%url, "GET");
        decode(self.http.get(url).send().await?).await
    }

    async fn create_analytics(&self, input: &NewAnalytics) -> Result<AnalyticsRecord, ClientError> {
        let url = self.url(&["api", "analytics"])?;
        tracing::debug!(%url, "POST");
        decode(self.http.post(url).json(input).send().await?).await
    }

    async fn update_analytics_by_id(
        &self,
        id: &str,
        record: &AnalyticsRecord,
    ) -> Result<AnalyticsRecord, ClientError> {
        let url = self.url(&["api", "analytics", id])?;
        tracing::debug!(%url, "PUT");
        decode(self.http.put(url).json(record).send().await?).await
    }

    async fn get_analytics_by_id(&self, id: &str) -> Result<Option<AnalyticsRecord>, ClientError> {
        let url = self.url(&["api", "analytics", id])?;
        tracing::debug!(%url, "GET");
        decode(self.http.get(url).send().await?).await
    }

    async fn delete_analytics_by_id(&self, id: &str) -> Result<AnalyticsRecord, ClientError> {
        let url = self.url(&["api", "analytics", id])?;
        tracing::debug!(%url, "DELETE");
        decode(self.http.delete(url).send().await?).await
    }

    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, ClientError> {
        let url = self.url(&["api", "restaurants"])?;
        tracing::debug!(%url, "GET");
        decode(self.http.get(url).send().await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_ids_and_tolerates_trailing_slash() {
        let c = HttpClient::new("http://localhost:3000/");
        let url = c.url(&["api", "analytics", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/analytics/a%20b%2Fc");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = HttpClient::new("http://localhost:3000/admin");
        let url = c.url(&["api", "restaurants"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/admin/api/restaurants");
    }

    #[test]
    fn bad_base_url_is_reported() {
        let c = HttpClient::new("not a url");
        assert!(matches!(c.url(&["api"]), Err(ClientError::InvalidUrl(_))));
    }
}
