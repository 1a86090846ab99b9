//! Axum route handlers for the project API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::projects::metrics::{project_metrics, ProjectMetricsResponse};
use crate::projects::models::{CreateProjectRequest, DeleteProjectResponse, ProjectResponse};
use crate::projects::service::{create_project, delete_project};
use crate::projects::store::{get_project, list_projects};
use crate::state::AppState;

/// POST /project/create-project
pub async fn handle_create_project(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    let project = create_project(
        &state.db,
        state.completion.as_ref(),
        &state.config,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /project/get-projects-overview
pub async fn handle_projects_overview(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    Ok(Json(list_projects(&state.db).await?))
}

/// GET /project/:project_id
pub async fn handle_get_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<ProjectResponse>, AppError> {
    let project = get_project(&state.db, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id} not found")))?;
    Ok(Json(project))
}

/// DELETE /project/:project_id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<DeleteProjectResponse>, AppError> {
    delete_project(&state.db, project_id).await?;
    Ok(Json(DeleteProjectResponse {
        message: "Project and its timeline deleted successfully".to_string(),
    }))
}

/// GET /project/:project_id/metrics
///
/// Phases are bucketed against today's UTC date.
pub async fn handle_project_metrics(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<ProjectMetricsResponse>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(project_metrics(&state.db, project_id, today).await?))
}
