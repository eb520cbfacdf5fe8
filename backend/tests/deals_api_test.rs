//! HTTP tests for the deal and report endpoints, run against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use dealdesk_backend::app::create_app;
use dealdesk_backend::models::{Deal, Manager};
use dealdesk_backend::state::AppState;
use dealdesk_backend::store::InMemoryDealStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn deal(day: u32, manager: Manager, reserve: f64, vsc: f64) -> Deal {
    Deal {
        id: Uuid::new_v4(),
        deal_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        stock_number: format!("S{}", day),
        last_name: "Carter".to_string(),
        first_name: "Dana".to_string(),
        financed: true,
        reserve,
        vsc,
        gap: 0.0,
        tw: 0.0,
        tricare: 0.0,
        key: 0.0,
        manager,
    }
}

fn example_deals() -> Vec<Deal> {
    vec![
        deal(1, Manager::Victor, 100.0, 50.0),
        deal(2, Manager::Kevin, 200.0, 0.0),
    ]
}

fn app_with(deals: Vec<Deal>) -> Router {
    create_app(AppState::new(Arc::new(InMemoryDealStore::with_deals(deals))))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn new_deal_payload(stock_number: &str) -> Value {
    json!({
        "stock_number": stock_number,
        "last_name": "Nguyen",
        "first_name": "Kim",
        "reserve": 400.0,
        "vsc": 1500.0,
        "gap": 600.0,
        "manager": "Paul"
    })
}

// ---------------------------------------------------------------------------
// Deal CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = app_with(vec![]);
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_create_and_fetch_deal() {
    let app = app_with(vec![]);
    let (status, bytes) = send(&app, Method::POST, "/api/deals", Some(new_deal_payload("N100"))).await;
    assert_eq!(status, StatusCode::OK);

    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["total_profit"], json!(2500.0));
    assert_eq!(created["financed"], json!(true));
    assert_eq!(created["manager"], "Paul");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = get_json(&app, &format!("/api/deals/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_rejects_long_stock_number() {
    let app = app_with(vec![]);
    let (status, _) = send(&app, Method::POST, "/api/deals", Some(new_deal_payload("STOCK-123456"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = get_json(&app, "/api/deals").await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_rejects_unknown_manager() {
    let app = app_with(vec![]);
    let mut payload = new_deal_payload("N200");
    payload["manager"] = json!("Bob");
    let (status, _) = send(&app, Method::POST, "/api/deals", Some(payload)).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_update_replaces_fields_but_not_date() {
    let original = deal(10, Manager::Victor, 100.0, 0.0);
    let id = original.id;
    let app = app_with(vec![original]);

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/deals/{}", id),
        Some(json!({
            "stock_number": "S10",
            "last_name": "Carter",
            "first_name": "Dana",
            "financed": false,
            "reserve": 250.0,
            "key": 75.0,
            "manager": "Kevin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated["deal_date"], "2024-05-10");
    assert_eq!(updated["financed"], json!(false));
    assert_eq!(updated["total_profit"], json!(325.0));
    assert_eq!(updated["manager"], "Kevin");
}

#[tokio::test]
async fn test_update_missing_deal_is_404() {
    let app = app_with(vec![]);
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/deals/{}", Uuid::new_v4()),
        Some(new_deal_payload("X1")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_deal() {
    let target = deal(3, Manager::Paul, 10.0, 0.0);
    let id = target.id;
    let app = app_with(vec![target]);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/deals/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&app, &format!("/api/deals/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/deals/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_five_latest_descending() {
    let deals = [4, 12, 1, 20, 7, 15, 9]
        .into_iter()
        .map(|day| deal(day, Manager::Victor, 1.0, 0.0))
        .collect();
    let app = app_with(deals);

    let (status, body) = get_json(&app, "/api/deals").await;
    assert_eq!(status, StatusCode::OK);

    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["deal_date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2024-05-20", "2024-05-15", "2024-05-12", "2024-05-09", "2024-05-07"]
    );
}

#[tokio::test]
async fn test_managers() {
    let app = app_with(vec![]);
    let (_, body) = get_json(&app, "/api/managers").await;
    assert_eq!(body, json!(["Victor", "Kevin", "Paul"]));
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_report_over_all_deals() {
    let app = app_with(example_deals());
    let (status, body) = get_json(&app, "/api/reports").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["total_profit"], json!(350.0));
    assert_eq!(body["total_deals"], json!(2));
    assert_eq!(body["avg_profit_per_car"], json!(175.0));
    assert_eq!(body["avg_products_sold"], json!(0.5));
    assert_eq!(
        body["products_sold"],
        json!({"vsc_sold": 1, "gap_sold": 0, "tw_sold": 0, "tricare_sold": 0, "key_sold": 0})
    );
}

#[tokio::test]
async fn test_report_filtered_by_manager() {
    let app = app_with(example_deals());
    let (status, body) = get_json(&app, "/api/reports?managers=Victor").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_profit"], json!(150.0));
    assert_eq!(body["total_deals"], json!(1));
    assert_eq!(body["criteria"]["managers"], json!(["Victor"]));
}

#[tokio::test]
async fn test_report_on_empty_range_is_zero() {
    let app = app_with(example_deals());
    let (status, body) =
        get_json(&app, "/api/reports?start_date=2025-01-01&end_date=2025-12-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_deals"], json!(0));
    assert_eq!(body["total_profit"], json!(0.0));
    assert_eq!(body["avg_profit_per_car"], json!(0.0));
    assert_eq!(body["avg_products_sold"], json!(0.0));
}

#[tokio::test]
async fn test_report_rejects_unknown_manager() {
    let app = app_with(example_deals());
    let (status, _) = get_json(&app, "/api/reports?managers=Victor,Bob").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_blank_fields_cover_full_set() {
    let app = app_with(example_deals());
    let (status, body) = get_json(&app, "/api/reports?start_date=&end_date=&managers=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_deals"], json!(2));
    assert_eq!(body["total_profit"], json!(350.0));
    assert_eq!(body["criteria"]["start_date"], Value::Null);
    assert_eq!(body["criteria"]["managers"], json!([]));

    let (status, bytes) = send(&app, Method::GET, "/api/reports/export?start_date=&end_date=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 3);
}

#[tokio::test]
async fn test_report_rejects_bad_date() {
    let app = app_with(example_deals());
    let (status, _) = get_json(&app, "/api/reports?start_date=05/01/2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_csv_export() {
    let app = app_with(example_deals());
    let request = Request::builder()
        .uri("/api/reports/export?start_date=2024-05-02")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"deals_report.csv\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "id,deal_date,stock_number,last_name,first_name,financed,reserve,vsc,gap,tw,tricare,key,manager"
    );
    assert!(lines[1].contains("2024-05-02"));
    assert!(lines[1].ends_with(",Kevin"));
}
