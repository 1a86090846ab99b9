//! Request/response shapes for templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// One section of a template and its subtitles, without storage ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOutline {
    pub title: String,
    #[serde(default)]
    pub subtitles: Vec<String>,
}

/// The section/subtitle shape handed to the timeline prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateStructure {
    pub sections: Vec<SectionOutline>,
}

/// A template to be inserted, either from a request body or a synthesized proposal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionOutline>,
}

impl NewTemplate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Template name cannot be empty".to_string(),
            ));
        }
        if let Some(index) = self.sections.iter().position(|s| s.title.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "Section {index} has an empty title"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubtitleResponse {
    pub id: Uuid,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionResponse {
    pub id: Uuid,
    pub title: String,
    pub subtitles: Vec<SubtitleResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sections: Vec<SectionResponse>,
    pub created_at: DateTime<Utc>,
}

impl TemplateResponse {
    pub fn structure(&self) -> TemplateStructure {
        TemplateStructure {
            sections: self
                .sections
                .iter()
                .map(|section| SectionOutline {
                    title: section.title.clone(),
                    subtitles: section
                        .subtitles
                        .iter()
                        .map(|s| s.subtitle.clone())
                        .collect(),
                })
                .collect(),
        }
    }
}
