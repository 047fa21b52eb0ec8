use serde_json::Value;

/// Pulls a JSON object out of a model response that may be wrapped in
/// markdown fences or surrounded by chatter. Trims to the outermost braces
/// before parsing.
pub(crate) fn extract_json(text: &str) -> Result<Value, serde_json::Error> {
    let mut s = text.trim();
    if let Some(stripped) = s.strip_prefix("```") {
        s = stripped.strip_prefix("json").unwrap_or(stripped);
        s = s.strip_suffix("```").unwrap_or(s);
        s = s.trim();
    }
    if let (Some(start), Some(end)) = (s.find('{'), s.rfind('}')) {
        if start < end {
            s = &s[start..=end];
        }
    }
    serde_json::from_str(s)
}
