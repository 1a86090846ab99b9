use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A project joined with its template's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub template_id: Uuid,
    pub template_name: String,
    pub created_at: DateTime<Utc>,
}

/// A timeline entry with the responsible user's email resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TimelineEntryRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub section: String,
    pub subtitle: Option<String>,
    pub responsible_email: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "start")]
    pub start_date: NaiveDate,
    #[serde(rename = "end")]
    pub end_date: NaiveDate,
}
