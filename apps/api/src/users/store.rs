use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::users::models::NewUser;

pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY email")
        .fetch_all(pool)
        .await
}

/// Inserts a user. A taken email maps to `Conflict`.
pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (id, email, name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&user.email)
    .bind(&user.name)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("A user with email {} already exists", user.email))
        }
        other => AppError::Database(other),
    })
}
