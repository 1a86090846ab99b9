use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::project::TimelineEntryRow;
use crate::timeline::models::{TimelineBrief, TimelineEntryDraft};

/// Request body for POST /project/create-project.
///
/// `timeline` present (even empty) is stored as given; absent asks the
/// completion service to generate one from `assignments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub template_id: Uuid,
    #[serde(default)]
    pub collaborators: Vec<String>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub assignments: BTreeMap<String, String>,
    #[serde(default)]
    pub timeline: Option<Vec<TimelineEntryDraft>>,
}

impl CreateProjectRequest {
    pub fn brief(&self) -> TimelineBrief<'_> {
        TimelineBrief {
            project_title: &self.title,
            project_description: self.description.as_deref(),
            collaborators: &self.collaborators,
            start_date: self.start_date,
            deadline: self.deadline,
            assignments: &self.assignments,
        }
    }
}

/// A project with its template name, collaborator emails and ordered timeline.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub template_id: Uuid,
    /// Template name.
    pub template: String,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub collaborators: Vec<String>,
    pub timeline: Vec<TimelineEntryRow>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    pub message: String,
}
