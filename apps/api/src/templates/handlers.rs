use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::templates::models::{NewTemplate, TemplateResponse};
use crate::templates::store::{create_template, get_template, list_templates};

/// GET /templates/get-all-templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateResponse>>, AppError> {
    Ok(Json(list_templates(&state.db).await?))
}

/// GET /templates/:template_id
pub async fn handle_get_template(
    State(state): State<AppState>,
    AppPath(template_id): AppPath<Uuid>,
) -> Result<Json<TemplateResponse>, AppError> {
    let template = get_template(&state.db, template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))?;
    Ok(Json(template))
}

/// POST /templates/create-template
pub async fn handle_create_template(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewTemplate>,
) -> Result<(StatusCode, Json<TemplateResponse>), AppError> {
    let template = create_template(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}
