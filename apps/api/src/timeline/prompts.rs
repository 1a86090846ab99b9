// Prompt templates for timeline generation.

/// System prompt: sets the persona for timeline generation.
pub const TIMELINE_SYSTEM: &str =
    "You are an expert project manager who creates detailed project timelines.";

/// Timeline prompt template. Every `{placeholder}` is replaced before sending.
pub const TIMELINE_PROMPT_TEMPLATE: &str = r#"Generate a detailed project timeline for the project titled '{project_title}'.
Description: {project_description}
Template Structure: {template_structure}
Collaborators: {collaborators}
Start Date: {start_date}
Deadline: {deadline}
Assignments: {assignments}

Constraints:
- All timeline dates must be between the project start date ({start_date}) and the deadline ({deadline}).
- Ensure that for any given collaborator, tasks do not overlap.
- Provide detailed timeline entries for every section and every subtitle listed in the template structure.

Output Requirements:
Return a valid JSON array where each element is an object with the following keys:
  - 'section': The section title.
  - 'subtitle': The subtitle title (or null if none).
  - 'responsible_email': The assigned collaborator's email for that section/subtitle, if any (or null).
  - 'start': The start date in {date_format} format.
  - 'end': The end date in {date_format} format.

Ensure that the timeline is as detailed as possible, providing entries for every section and subtitle, and that all dates are realistic and sequential so that the entire project is completed by the deadline.
{output_instruction}"#;
