//! Template synthesis. Asks the completion service to propose a template from
//! extracted document text, then normalizes the proposal into a `NewTemplate`.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_OBJECT_ONLY};
use crate::llm_client::{strip_json_fences, CompletionService};
use crate::templates::models::{NewTemplate, SectionOutline};
use crate::templates::prompts::{TEMPLATE_SYNTHESIS_PROMPT, TEMPLATE_SYNTHESIS_SYSTEM};

/// Document text beyond this many characters is not sent to the model.
const MAX_DOCUMENT_CHARS: usize = 48_000;

#[derive(Debug, Deserialize)]
struct TemplateProposal {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    sections: Option<Vec<SectionOutline>>,
    /// Older prompt shape nested sections under `structure`.
    #[serde(default)]
    structure: Option<ProposalStructure>,
}

#[derive(Debug, Deserialize)]
struct ProposalStructure {
    #[serde(default)]
    sections: Vec<SectionOutline>,
}

/// Asks the completion service for a template proposal and parses it.
pub async fn synthesize_template(
    completion: &dyn CompletionService,
    document_text: &str,
    filename: &str,
) -> Result<NewTemplate, AppError> {
    let prompt = build_synthesis_prompt(document_text, filename);
    let raw = completion
        .complete(TEMPLATE_SYNTHESIS_SYSTEM, &prompt)
        .await?;
    let template = parse_template_proposal(&raw, filename)?;

    info!(
        "Synthesized template '{}' with {} sections from {filename}",
        template.name,
        template.sections.len()
    );
    Ok(template)
}

pub fn build_synthesis_prompt(document_text: &str, filename: &str) -> String {
    fill_template(
        TEMPLATE_SYNTHESIS_PROMPT,
        &[
            ("filename", filename),
            ("output_instruction", JSON_OBJECT_ONLY),
            ("document_text", truncate_chars(document_text, MAX_DOCUMENT_CHARS)),
        ],
    )
}

/// Parses the completion text into a template, filling defaults:
/// a missing or blank name becomes the filename, a missing description becomes
/// "Auto-generated template from {filename}". Blank subtitles are dropped.
pub fn parse_template_proposal(raw: &str, filename: &str) -> Result<NewTemplate, AppError> {
    let parse_error = |message: String| AppError::TemplateParse {
        message,
        raw: raw.to_string(),
    };

    let proposal: TemplateProposal = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| parse_error(format!("Failed to parse template proposal: {e}")))?;

    let sections = proposal
        .sections
        .or(proposal.structure.map(|s| s.sections))
        .unwrap_or_default();

    let mut outlines = Vec::with_capacity(sections.len());
    for (index, section) in sections.into_iter().enumerate() {
        let title = section.title.trim().to_string();
        if title.is_empty() {
            return Err(parse_error(format!("Section {index} has an empty title")));
        }
        let subtitles = section
            .subtitles
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        outlines.push(SectionOutline { title, subtitles });
    }

    if outlines.is_empty() {
        return Err(parse_error(
            "Template proposal contained no sections".to_string(),
        ));
    }

    let name = proposal
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| filename.to_string());

    let description = proposal
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("Auto-generated template from {filename}"));

    Ok(NewTemplate {
        name,
        description: Some(description),
        icon: proposal.icon,
        sections: outlines,
    })
}

/// Cuts `text` to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
