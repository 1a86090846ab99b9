use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::templates::store::get_template;
use crate::timeline::generator::generate_timeline;
use crate::timeline::models::{GenerateTimelineRequest, TimelineEntryDraft};

/// POST /project/generate-timeline
///
/// Looks up the template (404 before any completion call), then asks the
/// completion service for a timeline. Nothing is persisted.
pub async fn handle_generate_timeline(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateTimelineRequest>,
) -> Result<Json<Vec<TimelineEntryDraft>>, AppError> {
    if request.project_title.trim().is_empty() {
        return Err(AppError::Validation(
            "project_title cannot be empty".to_string(),
        ));
    }

    let template = get_template(&state.db, request.template_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Template {} not found", request.template_id))
        })?;

    let entries = generate_timeline(
        state.completion.as_ref(),
        &request.brief(),
        &template.structure(),
        state.config.enforce_schedule_constraints,
    )
    .await?;

    Ok(Json(entries))
}
