//! Human-readable text for provider failures.

use serde_json::Value;

const DEFAULT_PREFIX: &str = "Error: ";
const FALLBACK: &str = "Something went wrong";

/// Produce one descriptive message for a failed provider request.
///
/// The server-reported reason wins (`error.message`, then `message`, then a
/// string `error` field). It is prefixed with `"Error: "` unless the reason
/// already says "error". Without a server reason the transport message is
/// used, and without that a generic fallback.
///
/// # Examples
///
/// ```rust
/// use relayswap::describe_failure;
/// use serde_json::json;
///
/// let body = json!({ "error": { "message": "Token not supported" } });
/// assert_eq!(describe_failure(Some(&body), None), "Error: Token not supported");
///
/// let body = json!({ "message": "Validation error" });
/// assert_eq!(describe_failure(Some(&body), None), "Validation error");
///
/// assert_eq!(describe_failure(None, Some("timed out")), "timed out");
/// assert_eq!(describe_failure(None, None), "Something went wrong");
/// ```
pub fn describe_failure(body: Option<&Value>, transport_message: Option<&str>) -> String {
    if let Some(reason) = body.and_then(server_reason) {
        let both_mention_error = DEFAULT_PREFIX.to_lowercase().contains("error")
            && reason.to_lowercase().contains("error");
        return if both_mention_error {
            reason.to_string()
        } else {
            format!("{DEFAULT_PREFIX}{reason}")
        };
    }

    match transport_message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => FALLBACK.to_string(),
    }
}

fn server_reason(body: &Value) -> Option<&str> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .filter(|reason| !reason.is_empty())
}
