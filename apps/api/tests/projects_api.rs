//! HTTP-level tests for project creation, reads, deletion and metrics.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, seed_template, StubCompletion};
use planner_api::config::CollaboratorPolicy;
use serde_json::{json, Value};
use sqlx::PgPool;

fn project_body(template_id: &str, timeline: Value) -> Value {
    json!({
        "title": "Spring launch",
        "description": "Ship the new onboarding",
        "template_id": template_id,
        "collaborators": ["ana@example.com"],
        "start_date": "2025-01-01",
        "deadline": "2025-03-31",
        "assignments": { "Research": "ana@example.com" },
        "timeline": timeline
    })
}

fn sample_timeline() -> Value {
    json!([
        { "section": "Research", "subtitle": "Survey", "responsible_email": "ana@example.com",
          "description": "Send the survey", "start": "2025-01-01", "end": "2025-01-10" },
        { "section": "Research", "subtitle": "Interviews", "responsible_email": "ana@example.com",
          "start": "2025-01-11", "end": "2025-01-31" },
        { "section": "Launch", "subtitle": null, "responsible_email": "nobody@example.com",
          "start": "2025-02-01", "end": "2025-03-31" }
    ])
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_create_project_round_trips_timeline(pool: PgPool) {
    common::create_user(&pool, "ana@example.com", "Ana").await;
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let completion = StubCompletion::replying("unused");
    let app = common::build_test_app(pool.clone(), completion.clone());
    let response = post_json(
        app,
        "/project/create-project",
        project_body(template_id, sample_timeline()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(completion.calls(), 0);

    let created = body_json(response).await;
    assert_eq!(created["template"], "Product launch");
    assert_eq!(created["collaborators"], json!(["ana@example.com"]));

    let id = created["id"].as_str().unwrap();
    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let fetched = body_json(get(app, &format!("/project/{id}")).await).await;
    assert_eq!(fetched, created);

    let timeline = fetched["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline[0]["subtitle"], "Survey");
    assert_eq!(timeline[0]["description"], "Send the survey");
    assert_eq!(timeline[0]["start"], "2025-01-01");
    assert_eq!(timeline[0]["end"], "2025-01-10");
    assert_eq!(timeline[1]["subtitle"], "Interviews");
    assert_eq!(timeline[2]["section"], "Launch");
    assert_eq!(timeline[2]["subtitle"], Value::Null);
    // Unknown responsible email is stored as unassigned.
    assert_eq!(timeline[2]["responsible_email"], Value::Null);
}

#[sqlx::test]
async fn test_create_project_generates_timeline_when_absent(pool: PgPool) {
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let reply = "```json\n[{\"section\":\"Launch\",\"subtitle\":null,\"responsible_email\":null,\"start\":\"2025-02-01\",\"end\":\"2025-02-10\"}]\n```";
    let completion = StubCompletion::replying(reply);
    let app = common::build_test_app(pool, completion.clone());

    let mut body = project_body(template_id, Value::Null);
    body["collaborators"] = json!([]);
    body.as_object_mut().unwrap().remove("timeline");

    let response = post_json(app, "/project/create-project", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(completion.calls(), 1);

    let created = body_json(response).await;
    assert_eq!(created["timeline"].as_array().unwrap().len(), 1);
    assert_eq!(created["timeline"][0]["section"], "Launch");
}

#[sqlx::test]
async fn test_unknown_template_creates_nothing_and_skips_completion(pool: PgPool) {
    let completion = StubCompletion::replying("[]");
    let app = common::build_test_app(pool.clone(), completion.clone());

    let mut body = project_body(&uuid::Uuid::new_v4().to_string(), Value::Null);
    body.as_object_mut().unwrap().remove("timeline");

    let response = post_json(app, "/project/create-project", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(completion.calls(), 0);
    assert_eq!(count(&pool, "projects").await, 0);
}

#[sqlx::test]
async fn test_supplied_entry_with_blank_section_is_rejected(pool: PgPool) {
    common::create_user(&pool, "ana@example.com", "Ana").await;
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let completion = StubCompletion::replying("unused");
    let app = common::build_test_app(pool.clone(), completion.clone());
    let timeline = json!([
        { "section": "Research", "start": "2025-01-01", "end": "2025-01-10" },
        { "section": "   ", "start": "2025-01-11", "end": "2025-01-20" }
    ]);
    let response = post_json(
        app,
        "/project/create-project",
        project_body(template_id, timeline),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"]["message"],
        "Timeline entry 1 has an empty section"
    );
    assert_eq!(completion.calls(), 0);
    assert_eq!(count(&pool, "projects").await, 0);
    assert_eq!(count(&pool, "timeline_entries").await, 0);
}

#[sqlx::test]
async fn test_malformed_project_id_gets_structured_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
    let response = get(app, "/project/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json["error"]["message"].is_string());

    let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
    let response = delete(app, "/project/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");

    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let response = get(app, "/project/not-a-uuid/metrics").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test]
async fn test_strict_policy_rejects_unknown_collaborator(pool: PgPool) {
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
    let response = post_json(
        app,
        "/project/create-project",
        project_body(template_id, sample_timeline()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("ana@example.com"));
    assert_eq!(count(&pool, "projects").await, 0);
    assert_eq!(count(&pool, "timeline_entries").await, 0);
}

#[sqlx::test]
async fn test_skip_policy_links_only_known_users(pool: PgPool) {
    common::create_user(&pool, "ana@example.com", "Ana").await;
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let mut config = common::test_config();
    config.collaborator_policy = CollaboratorPolicy::Skip;
    let app = common::build_test_app_with_config(
        pool.clone(),
        StubCompletion::replying(""),
        config,
    );

    let mut body = project_body(template_id, sample_timeline());
    body["collaborators"] = json!(["ana@example.com", "ghost@example.com"]);

    let response = post_json(app, "/project/create-project", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["collaborators"], json!(["ana@example.com"]));
    assert_eq!(count(&pool, "project_collaborators").await, 1);
}

#[sqlx::test]
async fn test_projects_overview_lists_every_project(pool: PgPool) {
    common::create_user(&pool, "ana@example.com", "Ana").await;
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
        let response = post_json(
            app,
            "/project/create-project",
            project_body(template_id, sample_timeline()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let json = body_json(get(app, "/project/get-projects-overview").await).await;
    let projects = json.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects
        .iter()
        .all(|p| p["timeline"].as_array().unwrap().len() == 3));
}

#[sqlx::test]
async fn test_delete_project_leaves_no_orphans(pool: PgPool) {
    common::create_user(&pool, "ana@example.com", "Ana").await;
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
    let created = body_json(
        post_json(
            app,
            "/project/create-project",
            project_body(template_id, sample_timeline()),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
    let response = delete(app, &format!("/project/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Project and its timeline deleted successfully"
    );

    assert_eq!(count(&pool, "projects").await, 0);
    assert_eq!(count(&pool, "timeline_entries").await, 0);
    assert_eq!(count(&pool, "project_collaborators").await, 0);
    // Users and templates are untouched.
    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "templates").await, 1);

    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let response = get(app, &format!("/project/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_delete_unknown_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let response = delete(app, &format!("/project/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_metrics_for_project_without_entries(pool: PgPool) {
    common::create_user(&pool, "ana@example.com", "Ana").await;
    let template = seed_template(&pool).await;
    let template_id = template["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone(), StubCompletion::replying(""));
    let created = body_json(
        post_json(
            app,
            "/project/create-project",
            project_body(template_id, json!([])),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let response = get(app, &format!("/project/{id}/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["phases"]["total_phases"], 0);
    assert_eq!(json["phases"]["completion_percentage"], 0);
    assert_eq!(json["team"]["total_members"], 1);
    assert_eq!(json["team"]["team_members"][0]["email"], "ana@example.com");
    assert!(json["last_updated"].is_string());
}

#[sqlx::test]
async fn test_metrics_for_unknown_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool, StubCompletion::replying(""));
    let response = get(app, &format!("/project/{}/metrics", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
