//! Timeline generation. Builds the prompt from a brief and a template
//! structure, calls the completion service once and parses the answer.
//!
//! Flow: build_timeline_prompt → complete → parse_timeline → audit_schedule.
//!
//! The constraints stated in the prompt (date window, no double-booking,
//! full coverage) are only audited, never repaired. Audit findings reject the
//! batch only when `enforce_schedule_constraints` is set.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, DATE_FORMAT_HINT, JSON_ARRAY_ONLY};
use crate::llm_client::{strip_json_fences, CompletionService};
use crate::templates::models::TemplateStructure;
use crate::timeline::models::{TimelineBrief, TimelineEntryDraft};
use crate::timeline::prompts::{TIMELINE_PROMPT_TEMPLATE, TIMELINE_SYSTEM};
use crate::timeline::schedule::audit_schedule;

/// Generates a timeline for `brief` over `structure`.
pub async fn generate_timeline(
    completion: &dyn CompletionService,
    brief: &TimelineBrief<'_>,
    structure: &TemplateStructure,
    enforce_schedule_constraints: bool,
) -> Result<Vec<TimelineEntryDraft>, AppError> {
    let prompt = build_timeline_prompt(brief, structure)?;

    info!(
        "Requesting timeline for '{}' ({} sections)",
        brief.project_title,
        structure.sections.len()
    );
    let raw = completion.complete(TIMELINE_SYSTEM, &prompt).await?;

    let entries = parse_timeline(&raw)?;

    let issues = audit_schedule(&entries, brief.start_date, brief.deadline, structure);
    for issue in &issues {
        warn!("Generated timeline for '{}': {issue}", brief.project_title);
    }
    if enforce_schedule_constraints && !issues.is_empty() {
        let summary = issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::ScheduleViolation(format!(
            "Generated timeline violates {} constraint(s): {summary}",
            issues.len()
        )));
    }

    info!(
        "Generated {} timeline entries for '{}'",
        entries.len(),
        brief.project_title
    );
    Ok(entries)
}

/// Fills the prompt template with the brief and the serialized structure.
pub fn build_timeline_prompt(
    brief: &TimelineBrief<'_>,
    structure: &TemplateStructure,
) -> Result<String, AppError> {
    let structure_json = serde_json::to_string(structure)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize structure: {e}")))?;
    let assignments_json = serde_json::to_string(brief.assignments).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize assignments: {e}"))
    })?;

    let collaborators = if brief.collaborators.is_empty() {
        "none".to_string()
    } else {
        brief.collaborators.join(", ")
    };

    let start_date = brief.start_date.to_string();
    let deadline = brief.deadline.to_string();

    Ok(fill_template(
        TIMELINE_PROMPT_TEMPLATE,
        &[
            ("project_title", brief.project_title),
            (
                "project_description",
                brief.project_description.unwrap_or("(none provided)"),
            ),
            ("template_structure", structure_json.as_str()),
            ("collaborators", collaborators.as_str()),
            ("start_date", start_date.as_str()),
            ("deadline", deadline.as_str()),
            ("assignments", assignments_json.as_str()),
            ("date_format", DATE_FORMAT_HINT),
            ("output_instruction", JSON_ARRAY_ONLY),
        ],
    ))
}

/// Parses a completion into timeline entries.
///
/// Fences are stripped first. The text must be a JSON array and every element
/// must match `TimelineEntryDraft` (dates as `YYYY-MM-DD`, non-blank section);
/// one bad element rejects the whole batch. Errors carry the raw completion.
pub fn parse_timeline(raw: &str) -> Result<Vec<TimelineEntryDraft>, AppError> {
    let parse_error = |message: String| AppError::TimelineParse {
        message,
        raw: raw.to_string(),
    };

    let value: Value = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| parse_error(format!("Failed to parse timeline: {e}")))?;

    let Value::Array(items) = value else {
        return Err(parse_error(
            "Unexpected timeline format: expected a JSON array".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let entry: TimelineEntryDraft = serde_json::from_value(item)
                .map_err(|e| parse_error(format!("Timeline entry {index} is malformed: {e}")))?;
            entry
                .check()
                .map_err(|problem| parse_error(format!("Timeline entry {index} {problem}")))?;
            Ok(entry)
        })
        .collect()
}
