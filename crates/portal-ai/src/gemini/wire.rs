//! Typed request/response bodies for `generateContent`.
//!
//! Deserialization is the validation step: anything that does not fit these
//! shapes becomes `AiError::MalformedResponse`. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::{AiError, Role, Turn};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub role: Role,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// One `contents` entry per turn, in transcript order.
    pub fn from_turns(turns: &'a [Turn]) -> Self {
        let contents = turns
            .iter()
            .map(|turn| Content {
                role: turn.role(),
                parts: vec![Part {
                    text: turn.content(),
                }],
            })
            .collect();
        Self { contents }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    pub fn parse(body: &[u8]) -> Result<Self, AiError> {
        serde_json::from_slice(body)
            .map_err(|e| AiError::MalformedResponse(format!("invalid response body: {e}")))
    }

    /// Text of `candidates[0].content.parts[0]`.
    pub fn into_first_text(self) -> Result<String, AiError> {
        let candidate = self
            .candidates
            .ok_or_else(|| malformed("no candidates in response"))?
            .into_iter()
            .next()
            .ok_or_else(|| malformed("empty candidates"))?;

        let part = candidate
            .content
            .ok_or_else(|| malformed("candidate has no content"))?
            .parts
            .ok_or_else(|| malformed("candidate content has no parts"))?
            .into_iter()
            .next()
            .ok_or_else(|| malformed("candidate content has empty parts"))?;

        part.text
            .ok_or_else(|| malformed("first part has no text"))
    }
}

fn malformed(reason: &str) -> AiError {
    AiError::MalformedResponse(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_text(body: &str) -> Result<String, AiError> {
        GenerateContentResponse::parse(body.as_bytes())?.into_first_text()
    }

    #[test]
    fn request_preserves_order_and_roles() {
        let turns = vec![
            Turn::user("a"),
            Turn::assistant("r1"),
            Turn::user("b"),
        ];
        let body = serde_json::to_value(GenerateContentRequest::from_turns(&turns)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "a" }] },
                    { "role": "assistant", "parts": [{ "text": "r1" }] },
                    { "role": "user", "parts": [{ "text": "b" }] },
                ]
            })
        );
    }

    #[test]
    fn reads_only_first_candidate_first_part() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }], "role": "model" } },
                { "content": { "parts": [{ "text": "other" }] } }
            ],
            "usageMetadata": { "promptTokenCount": 3 }
        }"#;
        assert_eq!(first_text(body).unwrap(), "first");
    }

    #[test]
    fn shape_mismatches_are_malformed() {
        for body in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {}}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}"#,
            r#"{"candidates": "nope"}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": 42}]}}]}"#,
            "not json",
        ] {
            let err = first_text(body).unwrap_err();
            assert!(err.is_malformed(), "expected malformed for {body}, got {err}");
        }
    }

    #[test]
    fn empty_text_is_accepted() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#;
        assert_eq!(first_text(body).unwrap(), "");
    }
}
