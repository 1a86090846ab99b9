#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use planner_api::config::{CollaboratorPolicy, Config};
use planner_api::llm_client::{CompletionService, LlmError};
use planner_api::routes::build_router;
use planner_api::state::AppState;

/// Completion backend that answers every call with the same scripted reply
/// and counts how often it was asked.
pub struct StubCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl StubCompletion {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(StubCompletion {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every call fails as if the upstream API answered with a 529.
    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(StubCompletion {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 529,
                message: message.clone(),
            }),
        }
    }
}

/// Config with test defaults. No real key is needed: the stub never calls out.
pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        anthropic_api_key: String::new(),
        port: 0,
        rust_log: "debug".to_string(),
        llm_timeout_secs: 5,
        collaborator_policy: CollaboratorPolicy::Strict,
        enforce_schedule_constraints: false,
        max_upload_bytes: 1024 * 1024,
    }
}

pub fn build_test_app(pool: PgPool, completion: Arc<StubCompletion>) -> Router {
    build_test_app_with_config(pool, completion, test_config())
}

pub fn build_test_app_with_config(
    pool: PgPool,
    completion: Arc<StubCompletion>,
    config: Config,
) -> Router {
    let state = AppState {
        db: pool,
        completion,
        config,
    };
    build_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

/// Posts `body` verbatim with a JSON content type, for malformed payloads.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a user through the API and returns its JSON.
pub async fn create_user(pool: &PgPool, email: &str, name: &str) -> Value {
    let app = build_test_app(pool.clone(), StubCompletion::replying(""));
    let response = post_json(
        app,
        "/users/create-user",
        serde_json::json!({ "email": email, "name": name }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Creates a template through the API and returns its JSON.
pub async fn create_template(pool: &PgPool, body: Value) -> Value {
    let app = build_test_app(pool.clone(), StubCompletion::replying(""));
    let response = post_json(app, "/templates/create-template", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Two sections: "Research" (Survey, Interviews) and "Launch" (no subtitles).
pub async fn seed_template(pool: &PgPool) -> Value {
    create_template(
        pool,
        serde_json::json!({
            "name": "Product launch",
            "description": "From idea to release",
            "sections": [
                { "title": "Research", "subtitles": ["Survey", "Interviews"] },
                { "title": "Launch", "subtitles": [] }
            ]
        }),
    )
    .await
}
