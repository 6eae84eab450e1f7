//! End-to-end tests for the `/api` routes, driven through the router with
//! an in-memory store and a store that always fails.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use outreach_server::config::Config;
use outreach_server::handlers::AppState;
use outreach_server::models::{
    Craft, Event, NewCraft, NewEvent, NewTeamMember, NewVolunteer, TeamMember, Volunteer,
};
use outreach_server::routes::create_routes;
use outreach_server::storage::memory::MemoryStorage;
use outreach_server::storage::{Storage, StorageError};

/// Every operation fails the way an unreachable database would.
struct FailingStorage;

fn unreachable() -> StorageError {
    StorageError::Internal("connection refused (os error 111) at 10.0.0.5:5432".into())
}

#[async_trait]
impl Storage for FailingStorage {
    async fn create_volunteer(&self, _new: NewVolunteer) -> Result<Volunteer, StorageError> {
        Err(unreachable())
    }
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StorageError> {
        Err(unreachable())
    }
    async fn create_craft(&self, _new: NewCraft) -> Result<Craft, StorageError> {
        Err(unreachable())
    }
    async fn list_crafts(&self) -> Result<Vec<Craft>, StorageError> {
        Err(unreachable())
    }
    async fn get_craft(&self, _id: i32) -> Result<Option<Craft>, StorageError> {
        Err(unreachable())
    }
    async fn create_team_member(&self, _new: NewTeamMember) -> Result<TeamMember, StorageError> {
        Err(unreachable())
    }
    async fn list_team_members(&self) -> Result<Vec<TeamMember>, StorageError> {
        Err(unreachable())
    }
    async fn create_event(&self, _new: NewEvent) -> Result<Event, StorageError> {
        Err(unreachable())
    }
    async fn list_events(&self) -> Result<Vec<Event>, StorageError> {
        Err(unreachable())
    }
}

fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("postgres://localhost/outreach_test".to_string()),
        "CLIENT_DIR" => Some("/nonexistent/outreach-client".to_string()),
        _ => None,
    })
    .unwrap()
}

fn build_app(storage: Arc<dyn Storage>) -> Router {
    create_routes(AppState::new(storage), &test_config()).unwrap()
}

fn memory_app() -> Router {
    build_app(Arc::new(MemoryStorage::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn bead_bracelet() -> Value {
    json!({
        "title": "Bead Bracelet",
        "description": "A colourful bracelet",
        "instructions": "Thread the beads and tie a knot",
        "difficulty": "easy",
        "timeToComplete": "30m",
        "category": "jewelry"
    })
}

// ---------------------------------------------------------------------------
// Volunteers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn minimal_volunteer_is_created_with_nulls() {
    let app = memory_app();
    let (status, body) = post(
        &app,
        "/api/volunteers",
        json!({ "name": "Ada", "email": "a@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["interests"], Value::Null);
    assert!(body["id"].is_i64());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn created_volunteer_appears_in_list() {
    let app = memory_app();
    let payload = json!({
        "name": "Ada",
        "email": "a@example.com",
        "age": 17,
        "interests": ["crafts", "tutoring"],
        "serviceHours": true
    });
    let (_, created) = post(&app, "/api/volunteers", payload.clone()).await;

    let (status, list) = get(&app, "/api/volunteers").await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0], created);
    for (key, value) in payload.as_object().unwrap() {
        assert_eq!(&list[0][key], value, "field {key}");
    }
}

#[tokio::test]
async fn volunteer_missing_email_is_rejected() {
    let app = memory_app();
    let (status, body) = post(&app, "/api/volunteers", json!({ "name": "Ada" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid volunteer data");
    assert_eq!(body["details"][0]["path"], json!(["email"]));

    let (_, list) = get(&app, "/api/volunteers").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/volunteers")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid volunteer data");
    assert_eq!(body["details"][0]["code"], "invalid_json");
}

#[tokio::test]
async fn non_json_content_type_is_a_validation_error() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/events")
            .header("content-type", "text/plain")
            .body(Body::from(
                json!({
                    "title": "Spring Fair",
                    "description": "Crafts and music",
                    "date": "2025-04-12"
                })
                .to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid event data");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["code"], "invalid_json");
    assert_eq!(details[0]["path"], json!([]));

    let (_, list) = get(&app, "/api/events").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn oversized_body_keeps_payload_too_large_status() {
    let app = memory_app();
    let huge = json!({ "name": "Ada", "email": "a@example.com", "school": "x".repeat(3 * 1024 * 1024) });
    let (status, body) = post(&app, "/api/volunteers", huge).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body.get("details").is_none());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn whole_float_age_is_accepted() {
    let app = memory_app();
    let (status, body) = post(
        &app,
        "/api/volunteers",
        json!({ "name": "Ada", "email": "a@example.com", "age": 16.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 16);
}

// ---------------------------------------------------------------------------
// Crafts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn craft_is_created_and_fetched_by_id() {
    let app = memory_app();
    let (status, created) = post(&app, "/api/crafts", bead_bracelet()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["timeToComplete"], "30m");
    assert_eq!(created["imageUrl"], Value::Null);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = get(&app, &format!("/api/crafts/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, list) = get(&app, "/api/crafts").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_craft_is_not_found() {
    let app = memory_app();
    let (status, body) = get(&app, "/api/crafts/99999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Craft not found" }));
}

#[tokio::test]
async fn non_numeric_craft_id_is_not_found() {
    let app = memory_app();
    let (status, body) = get(&app, "/api/crafts/bracelet").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Craft not found");

    // A numeric prefix is not read as an id
    post(&app, "/api/crafts", bead_bracelet()).await;
    let (status, _) = get(&app, "/api/crafts/1abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/api/crafts/1").await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[tokio::test]
async fn team_member_round_trip() {
    let app = memory_app();
    let (status, created) = post(
        &app,
        "/api/team",
        json!({ "name": "Grace", "role": "Coordinator", "isLeader": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["isLeader"], true);
    assert_eq!(created["bio"], Value::Null);

    let (_, list) = get(&app, "/api/team").await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn team_member_with_wrong_types_is_rejected() {
    let app = memory_app();
    let (status, body) = post(&app, "/api/team", json!({ "name": 5, "role": "Lead" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid team member data");
    assert_eq!(body["details"][0]["expected"], "string");
    assert_eq!(body["details"][0]["received"], "number");
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn event_missing_title_lists_title_error() {
    let app = memory_app();
    let (status, body) = post(
        &app,
        "/api/events",
        json!({ "description": "Crafts and music", "date": "2025-04-12T15:00:00Z" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid event data");
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["path"] == json!(["title"])));
}

#[tokio::test]
async fn event_defaults_attendees_to_zero() {
    let app = memory_app();
    let (status, body) = post(
        &app,
        "/api/events",
        json!({
            "title": "Spring Fair",
            "description": "Crafts and music",
            "date": "2025-04-12T15:00:00Z",
            "location": "Town Hall"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendees"], 0);
    assert_eq!(body["imageUrl"], Value::Null);
    assert_eq!(body["date"], "2025-04-12T15:00:00Z");

    let (_, list) = get(&app, "/api/events").await;
    assert_eq!(list[0]["location"], "Town Hall");
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failures_are_generic_500s() {
    let app = build_app(Arc::new(FailingStorage));

    let cases = [
        get(&app, "/api/volunteers").await,
        get(&app, "/api/crafts").await,
        get(&app, "/api/crafts/1").await,
        get(&app, "/api/team").await,
        get(&app, "/api/events").await,
    ];
    let expected = [
        "Failed to fetch volunteers",
        "Failed to fetch crafts",
        "Failed to fetch craft",
        "Failed to fetch team members",
        "Failed to fetch events",
    ];

    for ((status, body), message) in cases.into_iter().zip(expected) {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn create_failure_does_not_leak_cause() {
    let app = build_app(Arc::new(FailingStorage));
    let (status, body) = post(&app, "/api/crafts", bead_bracelet()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create craft" }));
    assert!(!body.to_string().contains("10.0.0.5"));
}

#[tokio::test]
async fn validation_runs_before_the_store() {
    let app = build_app(Arc::new(FailingStorage));
    let (status, _) = post(&app, "/api/events", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let app = memory_app();
    let (status, body) = get(&app, "/api/donations").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn api_responses_carry_security_headers() {
    let app = memory_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/crafts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().get("strict-transport-security").is_none());
}

#[tokio::test]
async fn client_application_is_served_outside_api() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>outreach</html>").unwrap();
    let client_dir = dir.path().to_string_lossy().into_owned();

    let config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("postgres://localhost/outreach_test".to_string()),
        "CLIENT_DIR" => Some(client_dir.clone()),
        _ => None,
    })
    .unwrap();
    let app = create_routes(AppState::new(Arc::new(MemoryStorage::new())), &config).unwrap();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/volunteer").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<html>outreach</html>");

    let (status, _) = get(&app, "/api/crafts").await;
    assert_eq!(status, StatusCode::OK);
}
