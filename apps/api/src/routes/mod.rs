pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::documents::handlers as documents;
use crate::projects::handlers as projects;
use crate::state::AppState;
use crate::templates::handlers as templates;
use crate::timeline::handlers as timeline;
use crate::users::handlers as users;

/// GET /
async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the API" }))
}

/// GET /project/
async fn project_status() -> Json<Value> {
    Json(json!({ "message": "Welcome to the project manager endpoints" }))
}

/// GET /pdf/
async fn pdf_status() -> Json<Value> {
    Json(json!({ "message": "Welcome to the parsing endpoints" }))
}

/// GET /latex/
async fn latex_status() -> Json<Value> {
    Json(json!({ "message": "Welcome to the LaTeX conversion endpoints" }))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    let project_routes = Router::new()
        .route("/create-project", post(projects::handle_create_project))
        .route(
            "/get-projects-overview",
            get(projects::handle_projects_overview),
        )
        .route("/generate-timeline", post(timeline::handle_generate_timeline))
        .route(
            "/:project_id",
            get(projects::handle_get_project).delete(projects::handle_delete_project),
        )
        .route("/:project_id/metrics", get(projects::handle_project_metrics));

    let template_routes = Router::new()
        .route("/get-all-templates", get(templates::handle_list_templates))
        .route("/create-template", post(templates::handle_create_template))
        .route("/:template_id", get(templates::handle_get_template));

    let user_routes = Router::new()
        .route("/create-user", post(users::handle_create_user))
        .route("/get-all-users", get(users::handle_list_users));

    let pdf_routes = Router::new()
        .route("/parse", post(documents::handle_parse_pdf))
        .layer(DefaultBodyLimit::max(upload_limit));

    let latex_routes = Router::new().route("/generate", post(documents::handle_generate_latex));

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health::health_handler))
        .route("/project/", get(project_status))
        .route("/pdf/", get(pdf_status))
        .route("/latex/", get(latex_status))
        .nest("/project", project_routes)
        .nest("/templates", template_routes)
        .nest("/users", user_routes)
        .nest("/pdf", pdf_routes)
        .nest("/latex", latex_routes)
        .with_state(state)
}
