//! Persistence seam. Handlers only see [`Store`]; PostgreSQL backs it in production and
//! [`MemoryStore`] backs it in tests and database-less local runs.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

use crate::error::AppError;
use crate::model::{AnalyticsPatch, AnalyticsRecord, NewAnalytics, NewRestaurant, Restaurant};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_analytics(&self) -> Result<Vec<AnalyticsRecord>, AppError>;

    async fn find_analytics(&self, id: &str) -> Result<Option<AnalyticsRecord>, AppError>;

    async fn create_analytics(&self, input: NewAnalytics) -> Result<AnalyticsRecord, AppError>;

    /// Writes every field present in `patch`. Returns `None` when no row has `id`.
    async fn update_analytics(
        &self,
        id: &str,
        patch: AnalyticsPatch,
    ) -> Result<Option<AnalyticsRecord>, AppError>;

    /// Returns the removed row, or `None` when no row has `id`.
    async fn delete_analytics(&self, id: &str) -> Result<Option<AnalyticsRecord>, AppError>;

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError>;

    async fn create_restaurant(&self, input: NewRestaurant) -> Result<Restaurant, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
