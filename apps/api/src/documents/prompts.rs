pub const LATEX_SYSTEM: &str = "You are an AI that converts text to LaTeX.";

/// `{content}` is replaced with the caller's text verbatim.
pub const LATEX_PROMPT_TEMPLATE: &str = "Convert this text to LaTeX: {content}";
