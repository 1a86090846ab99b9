use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A user as seen through `project_collaborators`.
#[derive(Debug, Clone, FromRow)]
pub struct CollaboratorRow {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}
