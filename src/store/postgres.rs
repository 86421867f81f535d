//! PostgreSQL store: table DDL, database bootstrap, and parameterized CRUD through [`crate::sql`].

use crate::error::AppError;
use crate::model::{AnalyticsPatch, AnalyticsRecord, NewAnalytics, NewRestaurant, Restaurant};
use crate::sql::{self, qualified_table, quoted, PgBindValue, QueryBuf, ANALYTICS, RESTAURANTS};
use crate::store::Store;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{ConnectOptions, FromRow, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    async fn fetch_optional<T>(&self, q: QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for p in params {
            query = query.bind(p);
        }
        query.fetch_optional(&self.pool).await.map_err(AppError::from_db)
    }

    async fn fetch_all<T>(&self, q: QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for p in params {
            query = query.bind(p);
        }
        query.fetch_all(&self.pool).await.map_err(AppError::from_db)
    }
}

fn analytics_values(record: AnalyticsRecord) -> Vec<(&'static str, PgBindValue)> {
    vec![
        ("id", record.id.into()),
        ("restaurant_id", record.restaurant_id.into()),
        ("report_date", record.report_date.into()),
        ("total_orders", record.total_orders.into()),
        ("total_revenue", record.total_revenue.into()),
    ]
}

fn patch_values(patch: AnalyticsPatch) -> Vec<(&'static str, PgBindValue)> {
    let mut values = Vec::new();
    if let Some(id) = patch.id {
        values.push(("id", id.into()));
    }
    if let Some(restaurant_id) = patch.restaurant_id {
        values.push(("restaurant_id", restaurant_id.into()));
    }
    if let Some(d) = patch.report_date {
        values.push(("report_date", d.into()));
    }
    if let Some(n) = patch.total_orders {
        values.push(("total_orders", n.into()));
    }
    if let Some(n) = patch.total_revenue {
        values.push(("total_revenue", n.into()));
    }
    values
}

#[async_trait]
impl Store for PgStore {
    async fn list_analytics(&self) -> Result<Vec<AnalyticsRecord>, AppError> {
        self.fetch_all(sql::select_list(&self.schema, &ANALYTICS)).await
    }

    async fn find_analytics(&self, id: &str) -> Result<Option<AnalyticsRecord>, AppError> {
        self.fetch_optional(sql::select_by_id(&self.schema, &ANALYTICS, id)).await
    }

    async fn create_analytics(&self, input: NewAnalytics) -> Result<AnalyticsRecord, AppError> {
        let q = sql::insert(&self.schema, &ANALYTICS, analytics_values(input.into_record()));
        self.fetch_optional(q)
            .await?
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update_analytics(
        &self,
        id: &str,
        patch: AnalyticsPatch,
    ) -> Result<Option<AnalyticsRecord>, AppError> {
        self.fetch_optional(sql::update(&self.schema, &ANALYTICS, id, patch_values(patch)))
            .await
    }

    async fn delete_analytics(&self, id: &str) -> Result<Option<AnalyticsRecord>, AppError> {
        self.fetch_optional(sql::delete(&self.schema, &ANALYTICS, id)).await
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        self.fetch_all(sql::select_list(&self.schema, &RESTAURANTS)).await
    }

    async fn create_restaurant(&self, input: NewRestaurant) -> Result<Restaurant, AppError> {
        let r = input.into_restaurant();
        let q = sql::insert(
            &self.schema,
            &RESTAURANTS,
            vec![("id", r.id.into()), ("name", r.name.into())],
        );
        self.fetch_optional(q)
            .await?
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the schema and both tables if they do not exist yet.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let restaurants = qualified_table(schema, RESTAURANTS.name);
    let analytics = qualified_table(schema, ANALYTICS.name);
    let ddl = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
            restaurants
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                restaurant_id TEXT NULL REFERENCES {} (id),
                report_date DATE NOT NULL,
                total_orders BIGINT NOT NULL CHECK (total_orders >= 0),
                total_revenue BIGINT NOT NULL CHECK (total_revenue >= 0)
            )
            "#,
            analytics, restaurants
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} (restaurant_id)",
            quoted("analytics_restaurant_id_idx"),
            analytics
        ),
    ];
    for stmt in &ddl {
        sqlx::query(stmt).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "tables ensured");
    Ok(())
}

/// Connects to the server's `postgres` database and creates the target database when it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}
