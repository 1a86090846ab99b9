// Prompt templates for document-to-template synthesis.

/// System prompt for template synthesis.
pub const TEMPLATE_SYNTHESIS_SYSTEM: &str = "\
You are an AI that converts raw document text into structured project templates. \
You MUST respond with valid JSON only.";

/// Template synthesis prompt. Replace `{filename}`, `{document_text}` and
/// `{output_instruction}` before sending.
pub const TEMPLATE_SYNTHESIS_PROMPT: &str = r#"Analyze the following document and propose a reusable project template.

A template is a named list of sections. Each section has a short title and a list of subtitles
naming the concrete pieces of work inside that section.

Return a JSON object with this EXACT schema:
{
  "name": "string",
  "description": "string",
  "sections": [
    {"title": "string", "subtitles": ["string", "string"]}
  ]
}

RULES:
1. Propose between 2 and 5 sections.
2. Each section has between 2 and 4 subtitles.
3. Titles and subtitles are short noun phrases taken from the document's own structure.
4. "name" is a short title for the template; "description" is one sentence.

DOCUMENT FILENAME: {filename}

DOCUMENT TEXT:
{document_text}

{output_instruction}"#;
