use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::users::models::NewUser;
use crate::users::store::{create_user, list_users};

/// POST /users/create-user
pub async fn handle_create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewUser>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    let user = create_user(&state.db, &request.normalized()?).await?;
    info!("Created user {} <{}>", user.id, user.email);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/get-all-users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    Ok(Json(list_users(&state.db).await?))
}
