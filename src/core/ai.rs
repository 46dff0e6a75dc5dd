// gemini integration - one prompt in, raw envelope out
// callers that can't tolerate errors use ask(), which always returns text

use crate::Error;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

// body is { "contents": [{ "parts": [{ "text": "..." }]}]}
#[derive(Serialize)]
struct Request {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
}

impl Gemini {
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        // flag takes priority, then common env var names
        let api_key = api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or(Error::MissingApiKey)?;

        // a stalled provider must not hold a session open forever
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self { client, api_key })
    }

    // send one prompt, return the provider's raw json envelope
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = Request {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(GEMINI_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        // error statuses still carry a json body; extract_text reports
        // the missing path, which reads better than a bare status code
        Ok(response.text().await?)
    }

    // like generate, but a transport failure degrades to a diagnostic
    // payload instead of an error, so the pipeline always has text to chew on
    pub async fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(body) => body,
            Err(e) => {
                warn!("completion call failed: {e}");
                r#"{"error":"API call failed"}"#.to_string()
            }
        }
    }
}

// pull candidates[0].content.parts[0].text out of the provider envelope
// tolerant by contract: malformed input yields a fixed string, never an error
pub fn extract_text(response_json: &str) -> String {
    let Ok(root) = serde_json::from_str::<serde_json::Value>(response_json) else {
        return "⚠️ Failed to parse Gemini response".to_string();
    };

    root.pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "⚠️ No text found in response".to_string())
}

#[cfg(test)]
mod tests {
    use super::extract_text;

    #[test]
    fn extracts_first_part_text() {
        let envelope = r#"{"candidates":[{"content":{"parts":[{"text":"X"}]}}]}"#;
        assert_eq!(extract_text(envelope), "X");
    }

    #[test]
    fn missing_candidates_yields_fixed_string() {
        assert_eq!(extract_text("{}"), "⚠️ No text found in response");
    }

    #[test]
    fn diagnostic_error_payload_yields_fixed_string() {
        // what ask() emits when the provider is unreachable
        assert_eq!(
            extract_text(r#"{"error":"API call failed"}"#),
            "⚠️ No text found in response"
        );
    }

    #[test]
    fn invalid_json_yields_parse_failure_string() {
        assert_eq!(extract_text("not json"), "⚠️ Failed to parse Gemini response");
    }
}
