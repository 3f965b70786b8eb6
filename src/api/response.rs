use crate::error::{RelayError, Result};
use serde_json::Value;

/// Extract `candidates[0].content.parts[0].text` from a `generateContent` response
pub fn extract_reply(response_json: &Value) -> Result<String> {
    let candidates = response_json
        .get("candidates")
        .and_then(|c| c.as_array())
        .ok_or_else(|| match block_reason(response_json) {
            Some(reason) => {
                RelayError::MalformedResponse(format!("Prompt blocked: {}", reason))
            }
            None => RelayError::MalformedResponse("No candidates in response".to_string()),
        })?;

    let first_candidate = candidates
        .first()
        .ok_or_else(|| RelayError::MalformedResponse("Empty candidates array".to_string()))?;

    let parts = first_candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| RelayError::MalformedResponse("No content parts in candidate".to_string()))?;

    parts
        .first()
        .and_then(|part| part.get("text"))
        .and_then(|t| t.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| RelayError::MalformedResponse("First part has no text".to_string()))
}

/// `promptFeedback.blockReason`, present when the service refused the prompt
pub fn block_reason(response_json: &Value) -> Option<String> {
    response_json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
        .map(|s| s.to_string())
}
