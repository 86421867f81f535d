//! Restaurant analytics admin: a JSON CRUD API over PostgreSQL plus server-rendered admin pages.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod validation;
pub mod views;

pub use cache::{FetchCache, Fetched};
pub use client::{AnalyticsApi, ClientError, HttpClient};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{AnalyticsPatch, AnalyticsRecord, NewAnalytics, NewRestaurant, Restaurant};
pub use routes::{api_routes, app, common_routes_with_ready, page_routes};
pub use state::{AppState, PageState};
pub use store::{ensure_database_exists, ensure_tables, MemoryStore, PgStore, Store};
