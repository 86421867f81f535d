use chrono::NaiveDate;
use restaurant_analytics::{
    app, AnalyticsApi, AppState, ClientError, HttpClient, MemoryStore, NewAnalytics, NewRestaurant, PageState, Store,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves the full app on an ephemeral port; the pages point back at the same server.
async fn spawn_server(store: Arc<MemoryStore>) -> HttpClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let client = HttpClient::new(base_url.clone());
    let pages = PageState::new(Arc::new(client.clone())).unwrap();
    let router = app(AppState::new(store), pages, 64 * 1024);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    client
}

fn input(orders: i64) -> NewAnalytics {
    NewAnalytics {
        id: None,
        restaurant_id: None,
        report_date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        total_orders: orders,
        total_revenue: orders * 25,
    }
}

#[tokio::test]
async fn client_round_trips_the_crud_contract() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;

    let created = client.create_analytics(&input(3)).await.unwrap();
    let listed = client.get_analytics().await.unwrap();
    assert_eq!(listed.iter().filter(|r| r.id == created.id).count(), 1);

    let mut edited = created.clone();
    edited.total_revenue = 999;
    let updated = client.update_analytics_by_id(&created.id, &edited).await.unwrap();
    assert_eq!(updated.total_revenue, 999);
    let fetched = client.get_analytics_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);

    client.delete_analytics_by_id(&created.id).await.unwrap();
    assert!(client.get_analytics().await.unwrap().is_empty());
    assert_eq!(client.get_analytics_by_id(&created.id).await.unwrap(), None);
}

#[tokio::test]
async fn client_surfaces_status_and_body() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    let mut ghost = client.create_analytics(&input(1)).await.unwrap();
    client.delete_analytics_by_id(&ghost.id).await.unwrap();
    ghost.total_orders = 2;

    match client.update_analytics_by_id(&ghost.id, &ghost).await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("not_found"));
        }
        other => panic!("expected 404, got {other:?}"),
    }
}

#[tokio::test]
async fn client_lists_restaurants() {
    let store = Arc::new(MemoryStore::new());
    store
        .create_restaurant(NewRestaurant {
            id: Some("r1".into()),
            name: "Deli".into(),
        })
        .await
        .unwrap();
    let client = spawn_server(store).await;
    let restaurants = client.get_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].id, "r1");
}

#[tokio::test]
async fn pages_reach_the_api_over_http() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    let created = client.create_analytics(&input(4)).await.unwrap();

    let html = reqwest::get(format!("{}/analytics", client.base_url()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(&created.id));
    assert!(html.contains("Sat Oct 17 2026"));
}

#[tokio::test]
async fn edit_page_turns_404_once_the_record_is_deleted() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    let created = client.create_analytics(&input(2)).await.unwrap();
    let url = format!("{}/analytics/edit/{}", client.base_url(), created.id);

    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.text().await.unwrap().contains("<form"));

    client.delete_analytics_by_id(&created.id).await.unwrap();

    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    assert!(!resp.text().await.unwrap().contains("<form"));
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let client = HttpClient::new("http://127.0.0.1:9");
    assert!(matches!(client.get_analytics().await, Err(ClientError::Transport(_))));
}
