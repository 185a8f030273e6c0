//! Wire schemas for the generateContent endpoint.

use serde::{Deserialize, Serialize};

/// generateContent request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    /// Single-turn user request asking for the structured judgment payload.
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(judgment_response_schema()),
                temperature: 0.2,
            },
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    pub temperature: f64,
}

/// generateContent response envelope. Lenient: every field defaulted so a
/// sparse body still deserializes and is rejected later as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate part, if the model produced one.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
    }
}

/// The structured payload the model is asked to emit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelJudgment {
    /// Intent purity, [-1,1].
    pub x: f64,
    /// Action weight, [-1,1].
    pub y: f64,
    #[serde(default)]
    pub y_min: Option<f64>,
    #[serde(default)]
    pub y_max: Option<f64>,
    #[serde(default)]
    pub x_min: Option<f64>,
    #[serde(default)]
    pub x_max: Option<f64>,
}

/// JSON schema sent in `generationConfig` so the endpoint returns the
/// judgment shape directly instead of prose.
pub fn judgment_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "x": { "type": "NUMBER" },
            "y": { "type": "NUMBER" },
            "y_min": { "type": "NUMBER" },
            "y_max": { "type": "NUMBER" },
            "x_min": { "type": "NUMBER" },
            "x_max": { "type": "NUMBER" }
        },
        "required": ["x", "y"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_happy_path() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"x\":0.1,\"y\":0.2}"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), Some("{\"x\":0.1,\"y\":0.2}"));
    }

    #[test]
    fn test_first_text_empty_envelope() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);

        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{}]}"#).unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_judgment_optional_bounds() {
        let judgment: ModelJudgment =
            serde_json::from_str(r#"{"x": -0.4, "y": 0.9}"#).unwrap();
        assert_eq!(judgment.x, -0.4);
        assert!(judgment.y_min.is_none());
        assert!(judgment.x_max.is_none());

        let judgment: ModelJudgment =
            serde_json::from_str(r#"{"x": 0.0, "y": 0.5, "y_min": 0.3, "y_max": 0.7}"#)
                .unwrap();
        assert_eq!(judgment.y_min, Some(0.3));
        assert_eq!(judgment.y_max, Some(0.7));
    }

    #[test]
    fn test_request_carries_schema_and_prompt() {
        let request = GenerateRequest::for_prompt("judge this");
        assert_eq!(request.contents[0].parts[0].text, "judge this");
        assert_eq!(request.generation_config.response_mime_type, "application/json");
        let schema = request.generation_config.response_schema.unwrap();
        assert_eq!(schema["required"][0], "x");
    }
}
