//! Shared state: the store behind the JSON API, and the client, caches and templates behind the pages.

use crate::cache::FetchCache;
use crate::client::AnalyticsApi;
use crate::model::{AnalyticsRecord, Restaurant};
use crate::store::Store;
use crate::views::Views;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        AppState { store }
    }
}

#[derive(Clone)]
pub struct PageState {
    pub api: Arc<dyn AnalyticsApi>,
    pub views: Arc<Views>,
    /// Records keyed by id.
    pub records: Arc<FetchCache<AnalyticsRecord>>,
    pub lists: Arc<FetchCache<Vec<AnalyticsRecord>>>,
    pub restaurants: Arc<FetchCache<Vec<Restaurant>>>,
}

impl PageState {
    pub fn new(api: Arc<dyn AnalyticsApi>) -> Result<Self, minijinja::Error> {
        Ok(PageState {
            api,
            views: Arc::new(Views::new()?),
            records: Arc::new(FetchCache::new()),
            lists: Arc::new(FetchCache::new()),
            restaurants: Arc::new(FetchCache::new()),
        })
    }
}
