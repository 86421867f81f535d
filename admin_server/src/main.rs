//! Admin server: JSON API, common routes and admin pages in one process.
//!
//! Run from repo root: `cargo run -p admin-server`
//! Without `DATABASE_URL` the in-memory store is used.

use restaurant_analytics::{
    app, ensure_database_exists, ensure_tables, AppConfig, AppState, HttpClient, MemoryStore, PageState, PgStore, Store,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("restaurant_analytics=info,admin_server=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_tables(&pool, &config.database_schema).await?;
            Arc::new(PgStore::new(pool, config.database_schema.clone()))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store);
    let pages = PageState::new(Arc::new(HttpClient::new(config.api_base_url.clone())))?;
    let router = app(state, pages, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}, pages call the API at {}", listener.local_addr()?, config.api_base_url);
    axum::serve(listener, router).await?;
    Ok(())
}
