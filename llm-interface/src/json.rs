use serde::de::DeserializeOwned;

/// Removes one surrounding markdown code fence (```` ``` ```` or
/// ```` ```json ````) if present. Text inside is returned untouched.
pub fn strip_code_fence(reply: &str) -> &str {
    let text = reply.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // The opening line is an info string only when it is a bare word like `json`.
    match body.split_once('\n') {
        Some((first, rest)) if first.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            rest.trim()
        }
        _ => strip_json_tag(body.trim()),
    }
}

/// Handles ```` ```json {...}``` ```` where the tag shares a line with the payload.
fn strip_json_tag(body: &str) -> &str {
    match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => {
            let rest = &body[4..];
            if rest.starts_with(char::is_whitespace) {
                rest.trim()
            } else {
                body
            }
        }
        _ => body,
    }
}

/// Strict parse of a whole model reply. Prose around the JSON is a failure.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_code_fence(reply))
}
