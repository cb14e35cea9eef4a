// Response sanitizer
//
// Models wrap JSON in markdown fences or chatter around it even when asked
// not to. `extract_json` finds the payload; `parse_lenient` deserialises it.

use serde::de::DeserializeOwned;

use super::AiError;

/// Locate the JSON object in a model response
///
/// Tries, in order: a ```json fence, a bare ``` fence whose body is an
/// object, the whole trimmed text, then the first balanced `{...}` span.
pub fn extract_json(response: &str) -> Option<&str> {
    if let Some(body) = fenced(response, "```json") {
        return Some(body);
    }
    if let Some(body) = fenced(response, "```") {
        if body.starts_with('{') || body.starts_with('[') {
            return Some(body);
        }
    }

    let trimmed = response.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(trimmed);
    }

    let start = response.find('{')?;
    balanced_object(&response[start..])
}

/// Parse a model response into `T`, tolerating fences and surrounding text
pub fn parse_lenient<T: DeserializeOwned>(response: &str) -> Result<T, AiError> {
    let json = extract_json(response)
        .ok_or_else(|| AiError::Parse("no JSON object in response".to_string()))?;
    serde_json::from_str(json).map_err(|e| AiError::Parse(e.to_string()))
}

fn fenced<'a>(response: &'a str, opener: &str) -> Option<&'a str> {
    let start = response.find(opener)? + opener.len();
    let rest = &response[start..];
    // Skip whatever follows the opener on its line (language tag, newline)
    let body_start = match opener {
        "```" => rest.find('\n').map(|nl| nl + 1).unwrap_or(0),
        _ => 0,
    };
    let body = &rest[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn balanced_object(candidate: &str) -> Option<&str> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in candidate.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&candidate[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
