//! External AI text generation used for menu suggestions.
//!
//! The upstream is a Gemini-style `generateContent` endpoint. Calls are bounded by the
//! timeout configured on the shared `reqwest::Client` and are never retried; each failure is
//! classified into an [`AiError`] so callers can tell "try again" from "unavailable".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::server::error::ai::AiError;

/// Instruction appended to every prompt to keep answers short and on topic.
const PROMPT_SUFFIX: &str = ". Please write your answer as concisely as possible, no longer than 50 characters. If this question is not about the 'food menu,' reply that you should only ask questions related to the menu.";

#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// Generates a reply for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// HTTP implementation of [`SuggestionGenerator`].
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    /// Endpoint URL with the API key appended.
    endpoint: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

impl GeminiClient {
    /// # Arguments
    /// - `http_client` - Shared client; its request timeout bounds every call
    /// - `api_url` - Endpoint URL up to (not including) the key
    /// - `api_key` - Key appended to the URL
    pub fn new(http_client: reqwest::Client, api_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            endpoint: format!("{}{}", api_url, api_key),
        }
    }
}

#[async_trait]
impl SuggestionGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let text = format!("{}{}", prompt, PROMPT_SUFFIX);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &text }],
            }],
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "AI upstream returned an error status");
            return Err(classify_status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_transport_error)?;

        extract_text(&body)
    }
}

fn classify_transport_error(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout
    } else if let Some(status) = err.status() {
        classify_status(status.as_u16())
    } else {
        AiError::Upstream(err.to_string())
    }
}

/// Maps a non-success upstream status onto the error taxonomy.
fn classify_status(status: u16) -> AiError {
    if (500..600).contains(&status) {
        AiError::Unavailable(status)
    } else {
        AiError::Upstream(format!("upstream responded with status {}", status))
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(body: &str) -> Result<String, AiError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| AiError::Upstream(format!("malformed response body: {}", e)))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text.trim().to_string())
        .ok_or_else(|| AiError::Upstream("response contained no candidate text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": " Spicy tteokbokki \n" }, { "text": "ignored" } ] } },
                { "content": { "parts": [ { "text": "second" } ] } }
            ]
        }"#;

        assert_eq!(extract_text(body).unwrap(), "Spicy tteokbokki");
    }

    #[test]
    fn missing_candidates_is_an_upstream_error() {
        assert!(matches!(
            extract_text(r#"{"candidates": []}"#),
            Err(AiError::Upstream(_))
        ));
        assert!(matches!(extract_text("not json"), Err(AiError::Upstream(_))));
    }

    #[test]
    fn server_errors_are_unavailable_and_the_rest_upstream() {
        assert!(matches!(classify_status(503), AiError::Unavailable(503)));
        assert!(matches!(classify_status(500), AiError::Unavailable(500)));
        assert!(matches!(classify_status(429), AiError::Upstream(_)));
        assert!(matches!(classify_status(400), AiError::Upstream(_)));
    }

    #[test]
    fn request_body_wraps_prompt_in_contents_parts() {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: "hello" }],
            }],
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "contents": [ { "parts": [ { "text": "hello" } ] } ] })
        );
    }
}
