//! In-process store with the same constraints the PostgreSQL tables declare.

use crate::error::AppError;
use crate::model::{AnalyticsPatch, AnalyticsRecord, NewAnalytics, NewRestaurant, Restaurant};
use crate::store::Store;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    analytics: Vec<AnalyticsRecord>,
}

impl Tables {
    fn check(&self, record: &AnalyticsRecord) -> Result<(), AppError> {
        if let Some(rid) = &record.restaurant_id {
            if !self.restaurants.iter().any(|r| &r.id == rid) {
                return Err(AppError::Conflict(format!(
                    "foreign key violation: restaurant '{}' does not exist",
                    rid
                )));
            }
        }
        if record.total_orders < 0 {
            return Err(AppError::Validation("total_orders must not be negative".into()));
        }
        if record.total_revenue < 0 {
            return Err(AppError::Validation("total_revenue must not be negative".into()));
        }
        Ok(())
    }
}

/// Rows are kept in insertion order, so listings are stable.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables.read().map_err(|_| AppError::Internal("store lock".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables.write().map_err(|_| AppError::Internal("store lock".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_analytics(&self) -> Result<Vec<AnalyticsRecord>, AppError> {
        Ok(self.read()?.analytics.clone())
    }

    async fn find_analytics(&self, id: &str) -> Result<Option<AnalyticsRecord>, AppError> {
        Ok(self.read()?.analytics.iter().find(|r| r.id == id).cloned())
    }

    async fn create_analytics(&self, input: NewAnalytics) -> Result<AnalyticsRecord, AppError> {
        let record = input.into_record();
        let mut tables = self.write()?;
        if tables.analytics.iter().any(|r| r.id == record.id) {
            return Err(AppError::Conflict(format!("duplicate key: analytics '{}'", record.id)));
        }
        tables.check(&record)?;
        tables.analytics.push(record.clone());
        Ok(record)
    }

    async fn update_analytics(
        &self,
        id: &str,
        patch: AnalyticsPatch,
    ) -> Result<Option<AnalyticsRecord>, AppError> {
        let mut tables = self.write()?;
        let Some(pos) = tables.analytics.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        let mut updated = tables.analytics[pos].clone();
        patch.apply(&mut updated);
        if updated.id != id && tables.analytics.iter().any(|r| r.id == updated.id) {
            return Err(AppError::Conflict(format!("duplicate key: analytics '{}'", updated.id)));
        }
        tables.check(&updated)?;
        tables.analytics[pos] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_analytics(&self, id: &str) -> Result<Option<AnalyticsRecord>, AppError> {
        let mut tables = self.write()?;
        let pos = tables.analytics.iter().position(|r| r.id == id);
        Ok(pos.map(|i| tables.analytics.remove(i)))
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        Ok(self.read()?.restaurants.clone())
    }

    async fn create_restaurant(&self, input: NewRestaurant) -> Result<Restaurant, AppError> {
        let restaurant = input.into_restaurant();
        let mut tables = self.write()?;
        if tables.restaurants.iter().any(|r| r.id == restaurant.id) {
            return Err(AppError::Conflict(format!("duplicate key: restaurant '{}'", restaurant.id)));
        }
        tables.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
