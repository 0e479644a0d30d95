//! Handler tests for the Tasks domain
//!
//! The task router runs behind the JWT auth middleware, exactly as wired in
//! the application, so these tests cover the full path from Bearer token to
//! owner-scoped repository access over the in-memory implementation.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum_helpers::{JwtAuth, JwtConfig, jwt_auth_middleware};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

const TEST_SECRET: &str = "test-secret-that-is-at-least-32-chars!";

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn tasks_app() -> (Router, JwtAuth) {
    let jwt_auth = JwtAuth::new(&JwtConfig::new(TEST_SECRET));
    let service = TaskService::new(InMemoryTaskRepository::new());

    let app = handlers::router(service).layer(from_fn_with_state(
        jwt_auth.clone(),
        jwt_auth_middleware,
    ));
    (app, jwt_auth)
}

fn access_token(jwt_auth: &JwtAuth, user_id: Uuid) -> String {
    jwt_auth
        .create_access_token(&user_id.to_string(), "alice@example.com", "Alice")
        .unwrap()
}

fn create_request(token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// Create a task and return it parsed from the response body
async fn create_task(app: &Router, token: &str, title: &str) -> Task {
    let response = app
        .clone()
        .oneshot(create_request(token, json!({ "title": title })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_task_returns_201_with_owner() {
    let (app, jwt_auth) = tasks_app();
    let owner = TestDataBuilder::from_test_name("tasks_create").user_id();
    let token = access_token(&jwt_auth, owner);

    let response = app
        .oneshot(create_request(&token, json!({ "title": "Buy milk" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.user_id, owner);
    assert!(!task.completed);
}

#[tokio::test]
async fn test_create_task_accepts_completed_flag() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let response = app
        .oneshot(create_request(
            &token,
            json!({ "title": "Already done", "completed": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let task: Task = json_body(response.into_body()).await;
    assert!(task.completed);
}

#[tokio::test]
async fn test_create_task_rejects_empty_title() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let response = app
        .oneshot(create_request(&token, json!({ "title": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_task_returns_200() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let created = create_task(&app, &token, "Write tests").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.id, created.id);
    assert_eq!(task.title, "Write tests");
}

#[tokio::test]
async fn test_get_task_returns_404_for_missing() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", Uuid::now_v7()))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_task_returns_400_for_malformed_id() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_tasks_returns_only_own_tasks() {
    let (app, jwt_auth) = tasks_app();
    let alice_token = access_token(&jwt_auth, Uuid::now_v7());
    let bob_token = access_token(&jwt_auth, Uuid::now_v7());

    let alice_task = create_task(&app, &alice_token, "Alice's task").await;
    create_task(&app, &bob_token, "Bob's task").await;

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("authorization", format!("Bearer {}", alice_token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let tasks: Vec<Task> = json_body(response.into_body()).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, alice_task.id);
}

#[tokio::test]
async fn test_list_tasks_filters_by_completed() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    create_task(&app, &token, "Open task").await;
    let response = app
        .clone()
        .oneshot(create_request(
            &token,
            json!({ "title": "Done task", "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method("GET")
        .uri("/?completed=true")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let tasks: Vec<Task> = json_body(response.into_body()).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Done task");
}

#[tokio::test]
async fn test_another_users_task_reads_as_missing() {
    let (app, jwt_auth) = tasks_app();
    let alice_token = access_token(&jwt_auth, Uuid::now_v7());
    let bob_token = access_token(&jwt_auth, Uuid::now_v7());

    let task = create_task(&app, &alice_token, "Private").await;

    // GET
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", task.id))
        .header("authorization", format!("Bearer {}", bob_token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // PUT
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", task.id))
        .header("authorization", format!("Bearer {}", bob_token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "completed": true })).unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // DELETE
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", task.id))
        .header("authorization", format!("Bearer {}", bob_token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner still sees the untouched task
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", task.id))
        .header("authorization", format!("Bearer {}", alice_token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let unchanged: Task = json_body(response.into_body()).await;
    assert!(!unchanged.completed);
}

#[tokio::test]
async fn test_update_task_returns_200() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let created = create_task(&app, &token, "Original title").await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", created.id))
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "completed": true })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert!(task.completed);
    assert_eq!(task.title, "Original title");
}

#[tokio::test]
async fn test_update_task_validates_title() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let created = create_task(&app, &token, "Valid title").await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", created.id))
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "title": "" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_task_returns_deleted_record() {
    let (app, jwt_auth) = tasks_app();
    let token = access_token(&jwt_auth, Uuid::now_v7());

    let created = create_task(&app, &token, "Doomed").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let deleted: Task = json_body(response.into_body()).await;
    assert_eq!(deleted.id, created.id);
    assert_eq!(deleted.title, "Doomed");

    // A second delete must now fail
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_requests_without_token_return_401() {
    let (app, _) = tasks_app();

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_requests_with_invalid_token_return_401() {
    let (app, _) = tasks_app();

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
