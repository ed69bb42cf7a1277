#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use coverage_board::{Employee, Roster, http_api};
use serde_json::json;
use tower::util::ServiceExt;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_router() -> axum::Router {
    let mut roster = Roster::new();

    let mut alice = Employee::new("Alice", true);
    alice.days_off = vec![d(2024, 1, 2)];
    alice.accounts = vec!["X".to_string()];
    roster.upsert_employee_record(alice).unwrap();

    let mut bob = Employee::new("Bob", false);
    bob.accounts = vec!["X".to_string(), "Y".to_string()];
    roster.upsert_employee_record(bob).unwrap();

    let state = http_api::AppState::new(roster).expect("board builds");
    http_api::router(state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = new_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn board_lists_one_card_per_day_off() {
    let app = new_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/board")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], json!("2024-01-02"));
    assert_eq!(days[0]["everyday"], json!("unmet"));
}

#[tokio::test]
async fn toggle_updates_card_indicators() {
    let app = new_router();
    let payload = json!({ "employee": "Bob", "date": "2024-01-02", "checked": true });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board/toggle")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let card = json_body(response).await;
    assert_eq!(card["everyday"], json!("unmet"));
    let accounts = card["accounts"].as_array().unwrap();
    assert!(accounts.iter().all(|a| a["tier"] == json!("green")));

    // The mutation must be visible on a later read through the same state.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/board/2024-01-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let card = json_body(response).await;
    let bob = card["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["employee"] == json!("Bob"))
        .unwrap();
    assert_eq!(bob["checked"], json!(true));
}

#[tokio::test]
async fn toggling_disabled_entry_returns_bad_request() {
    let app = new_router();
    let payload = json!({ "employee": "Alice", "date": "2024-01-02", "checked": true });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board/toggle")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], json!("invalid_request"));
}

#[tokio::test]
async fn unknown_day_returns_not_found() {
    let app = new_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/board/2030-06-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn employees_endpoint_returns_dataset_order() {
    let app = new_router();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/employees/Nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replacing_roster_rebuilds_the_board() {
    let app = new_router();
    let payload = json!({
        "employees": [
            { "name": "Cara", "daysOff": ["2024-02-05", "2024-02-12"], "accounts": ["Z"], "everyday": true }
        ]
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let board = json_body(response).await;
    assert_eq!(board["days"].as_array().unwrap().len(), 2);

    // The previous dataset is gone.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/employees/Alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_roster_payload_returns_bad_request() {
    let app = new_router();
    let payload = json!({ "employees": "not-an-array" });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    // axum rejects the body before the handler runs; either way no board
    // mutation happens and the client sees a 4xx.
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn recompute_is_idempotent_over_http() {
    let app = new_router();
    let payload = json!({ "employee": "Bob", "date": "2024-01-02", "checked": true });
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board/toggle")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board/recompute")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let second = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board/recompute")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(json_body(first).await, json_body(second).await);
}
