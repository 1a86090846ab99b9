use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dated unit of work before it is stored: the element shape of both a
/// supplied `timeline` and a generated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntryDraft {
    pub section: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub responsible_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineEntryDraft {
    /// Per-element rule shared by supplied and generated timelines.
    /// Date order is left to the schedule audit.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.section.trim().is_empty() {
            return Err("has an empty section");
        }
        Ok(())
    }
}

/// Request body for POST /project/generate-timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTimelineRequest {
    pub project_title: String,
    #[serde(default)]
    pub project_description: Option<String>,
    pub template_id: Uuid,
    #[serde(default)]
    pub collaborators: Vec<String>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    /// Section or subtitle name → collaborator email.
    #[serde(default)]
    pub section_assignments: BTreeMap<String, String>,
}

impl GenerateTimelineRequest {
    pub fn brief(&self) -> TimelineBrief<'_> {
        TimelineBrief {
            project_title: &self.project_title,
            project_description: self.project_description.as_deref(),
            collaborators: &self.collaborators,
            start_date: self.start_date,
            deadline: self.deadline,
            assignments: &self.section_assignments,
        }
    }
}

/// Everything the timeline prompt needs besides the template structure.
#[derive(Debug, Clone, Copy)]
pub struct TimelineBrief<'a> {
    pub project_title: &'a str,
    pub project_description: Option<&'a str>,
    pub collaborators: &'a [String],
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub assignments: &'a BTreeMap<String, String>,
}
