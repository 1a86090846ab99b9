// Shared prompt fragments.
// Each module that calls the completion service defines its own prompts.rs
// alongside it; this file holds the pieces they have in common.

/// Appended to prompts whose answer is parsed as a JSON array.
pub const JSON_ARRAY_ONLY: &str = "\
    Output only the JSON array with no additional text. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose answer is parsed as a JSON object.
pub const JSON_OBJECT_ONLY: &str = "\
    Output only the JSON object with no additional text. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Date format every prompt asks for. Matches chrono's `NaiveDate` serde format.
pub const DATE_FORMAT_HINT: &str = "YYYY-MM-DD";

/// Substitutes `{key}` placeholders in one left-to-right pass.
///
/// Substituted values are never rescanned, so user text that happens to
/// contain `{deadline}` or similar is sent verbatim. Braces that do not name a
/// known key (JSON examples in a prompt) are left untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match substitution {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
