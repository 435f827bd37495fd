//! JSON bodies exchanged with the backend.
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskResponse {
    pub reply: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub top_chunks: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoadResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub chunks_loaded: u64,
}

/// Extracts `detail` from an error body.
///
/// Validation errors carry a structured `detail`; anything that is not a
/// plain string is rendered as compact JSON.
pub(crate) fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_extracted() {
        assert_eq!(
            error_detail(br#"{"detail":"Error communicating with AI provider."}"#),
            Some("Error communicating with AI provider.".to_string())
        );
    }

    #[test]
    fn missing_or_blank_detail_is_none() {
        assert_eq!(error_detail(b"{}"), None);
        assert_eq!(error_detail(br#"{"detail":"  "}"#), None);
        assert_eq!(error_detail(b"<html>bad gateway</html>"), None);
    }

    #[test]
    fn structured_detail_is_serialized() {
        let detail = error_detail(br#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn ask_response_tolerates_missing_extras() {
        let parsed: AskResponse = serde_json::from_str(r#"{"reply":"Hi there"}"#).unwrap();
        assert_eq!(parsed.reply, "Hi there");
        assert!(parsed.query.is_none());
        assert!(parsed.top_chunks.is_empty());
    }
}
