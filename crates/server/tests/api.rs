use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();

    router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn ana() -> Value {
    json!({"name": "Ana Silva", "document": "123", "phone": "555"})
}

#[tokio::test]
async fn create_guest_returns_created_with_self_link() {
    let app = test_router().await;

    let response = send(&app, "POST", "/hotel/guests", Some(ana())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()["hotelcheckin-version"].to_str().unwrap(),
        "1.0"
    );

    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ana Silva");
    assert_eq!(body["total_spent_minor"], 0);
    assert_eq!(body["links"][0]["rel"], "self");
    assert_eq!(body["links"][0]["href"], "/hotel/guests/1");
}

#[tokio::test]
async fn version_header_is_echoed_back() {
    let app = test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/hotel/guests")
        .header(header::CONTENT_TYPE, "application/json")
        .header("hotelcheckin-version", "2.3")
        .body(Body::from(ana().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["hotelcheckin-version"].to_str().unwrap(),
        "2.3"
    );
}

#[tokio::test]
async fn guest_with_missing_field_is_rejected_before_any_write() {
    let app = test_router().await;

    let response = send(
        &app,
        "POST",
        "/hotel/guests",
        Some(json!({"name": "Ana Silva", "document": "123"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was stored.
    let response = send(&app, "GET", "/hotel/guests", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn short_guest_name_is_unprocessable() {
    let app = test_router().await;

    let response = send(
        &app,
        "POST",
        "/hotel/guests",
        Some(json!({"name": "Al", "document": "123", "phone": "555"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("3 chars"));
}

#[tokio::test]
async fn unknown_guest_is_not_found() {
    let app = test_router().await;

    let response = send(&app, "GET", "/hotel/guests/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_mismatched_payload_id_is_forbidden() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let response = send(
        &app,
        "PUT",
        "/hotel/guests/1",
        Some(json!({"id": 2, "name": "Ana Souza", "document": "123", "phone": "555"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        "PUT",
        "/hotel/guests/1",
        Some(json!({"id": 1, "name": "Ana Souza", "document": "123", "phone": "555"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Ana Souza");
}

#[tokio::test]
async fn full_stay_flow_accumulates_the_expected_total() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    // Friday afternoon in, Sunday 17:00 out; offsets are tolerated on
    // input, the clock fields are what count.
    let response = send(
        &app,
        "POST",
        "/hotel/checkins",
        Some(json!({
            "guest_id": 1,
            "entry_time": "2024-06-07T14:00:00.000-0300",
            "exit_time": "2024-06-09T17:00:00.000-0300",
            "vehicle_surcharge": false
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["links"][0]["href"], "/hotel/checkins/1");

    // Fri 120 + Sat 150 + Sun 150, no late-checkout surcharge at 17:00.
    let response = send(&app, "GET", "/hotel/guests/1", None).await;
    let body = body_json(response).await;
    assert_eq!(body["total_spent_minor"], 42000);

    // The stay view embeds the guest and round-trips the wire pattern.
    let response = send(&app, "GET", "/hotel/checkins/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["guest"]["total_spent_minor"], 42000);
    assert_eq!(body["entry_time"], "2024-06-07T14:00:00.000Z");
    assert_eq!(body["exit_time"], "2024-06-09T17:00:00.000Z");
}

#[tokio::test]
async fn checkin_with_missing_field_is_rejected() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let response = send(
        &app,
        "POST",
        "/hotel/checkins",
        Some(json!({
            "guest_id": 1,
            "entry_time": "2024-06-07T14:00:00.000Z",
            "vehicle_surcharge": false
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn checkin_with_malformed_timestamp_is_rejected() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let response = send(
        &app,
        "POST",
        "/hotel/checkins",
        Some(json!({
            "guest_id": 1,
            "entry_time": "07/06/2024 14:00",
            "exit_time": "2024-06-09T17:00:00.000Z",
            "vehicle_surcharge": false
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn checkin_for_unknown_guest_is_not_found() {
    let app = test_router().await;

    let response = send(
        &app,
        "POST",
        "/hotel/checkins",
        Some(json!({
            "guest_id": 42,
            "entry_time": "2024-06-07T14:00:00.000Z",
            "exit_time": "2024-06-09T17:00:00.000Z",
            "vehicle_surcharge": false
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_checkin_for_the_same_guest_conflicts() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let stay = json!({
        "guest_id": 1,
        "entry_time": "2024-06-07T14:00:00.000Z",
        "exit_time": "2024-06-09T17:00:00.000Z",
        "vehicle_surcharge": false
    });
    send(&app, "POST", "/hotel/checkins", Some(stay.clone())).await;

    let response = send(&app, "POST", "/hotel/checkins", Some(stay)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn document_lookup_distinguishes_not_found_from_empty_success() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let response = send(&app, "GET", "/hotel/checkins/byDocument/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("999"));

    let response = send(&app, "GET", "/hotel/checkins/byDocument/123", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["links"][0]["href"], "/hotel/guests/1");
}

#[tokio::test]
async fn name_lookup_is_case_sensitive() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let response = send(&app, "GET", "/hotel/checkins/byName/Ana%20Silva", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/hotel/checkins/byName/ana%20silva", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exit_filter_lists_checked_out_guests() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;
    send(
        &app,
        "POST",
        "/hotel/checkins",
        Some(json!({
            "guest_id": 1,
            "entry_time": "2024-06-07T14:00:00.000Z",
            "exit_time": "2024-06-09T17:00:00.000Z",
            "vehicle_surcharge": false
        })),
    )
    .await;

    let response = send(&app, "GET", "/hotel/guests/byExit/true", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);

    // Every stay recorded through the API has an exit, so nobody is
    // currently in.
    let response = send(&app, "GET", "/hotel/guests/byExit/false", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_guest_without_stays_succeeds() {
    let app = test_router().await;
    send(&app, "POST", "/hotel/guests", Some(ana())).await;

    let response = send(&app, "DELETE", "/hotel/guests/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("deleted"));

    let response = send(&app, "GET", "/hotel/guests/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
