//! Runs against a live server only when `TEST_DATABASE_URL` is set; otherwise each test returns early.

use chrono::NaiveDate;
use restaurant_analytics::{
    ensure_database_exists, ensure_tables, AnalyticsPatch, AppError, NewAnalytics, NewRestaurant, PgStore, Store,
};
use sqlx::postgres::{PgPool, PgPoolOptions};

struct TestDb {
    pool: PgPool,
    schema: String,
}

impl TestDb {
    async fn connect() -> Option<Self> {
        let url = std::env::var("TEST_DATABASE_URL").ok().filter(|u| !u.trim().is_empty())?;
        ensure_database_exists(&url).await.unwrap();
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
        let schema = format!("analytics_test_{}", uuid::Uuid::new_v4().simple());
        ensure_tables(&pool, &schema).await.unwrap();
        // Second run must be a no-op.
        ensure_tables(&pool, &schema).await.unwrap();
        Some(TestDb { pool, schema })
    }

    fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone(), self.schema.clone())
    }

    async fn drop_schema(self) {
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .unwrap();
    }
}

fn input(restaurant_id: Option<&str>, orders: i64) -> NewAnalytics {
    NewAnalytics {
        id: None,
        restaurant_id: restaurant_id.map(str::to_string),
        report_date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        total_orders: orders,
        total_revenue: orders * 10,
    }
}

#[tokio::test]
async fn constraints_surface_as_client_errors() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let store = db.store();

    let err = store.create_analytics(input(Some("missing"), 1)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{err:?}");

    let err = store.create_analytics(input(None, -1)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "{err:?}");

    let created = store.create_analytics(input(None, 1)).await.unwrap();
    let mut dup = input(None, 2);
    dup.id = Some(created.id.clone());
    let err = store.create_analytics(dup).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{err:?}");

    db.drop_schema().await;
}

#[tokio::test]
async fn crud_round_trip_and_missing_rows() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let store = db.store();

    store
        .create_restaurant(NewRestaurant {
            id: Some("r1".into()),
            name: "Deli".into(),
        })
        .await
        .unwrap();
    let created = store.create_analytics(input(Some("r1"), 3)).await.unwrap();
    assert_eq!(store.list_analytics().await.unwrap(), vec![created.clone()]);

    let patch = AnalyticsPatch {
        total_revenue: Some(99),
        restaurant_id: Some(None),
        ..Default::default()
    };
    let updated = store.update_analytics(&created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.total_revenue, 99);
    assert_eq!(updated.restaurant_id, None);
    assert_eq!(store.find_analytics(&created.id).await.unwrap(), Some(updated.clone()));

    assert!(store.update_analytics("ghost", AnalyticsPatch::default()).await.unwrap().is_none());
    assert!(store.delete_analytics("ghost").await.unwrap().is_none());

    assert_eq!(store.delete_analytics(&created.id).await.unwrap(), Some(updated));
    assert!(store.list_analytics().await.unwrap().is_empty());
    store.ping().await.unwrap();

    db.drop_schema().await;
}
