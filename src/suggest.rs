use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SUGGEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fields proposed for a new link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub description: String,
    pub category:    String,
    pub icon:        String,
}

/// URL → suggested metadata. Implementations never report errors; any
/// failure is `None`.
pub trait MetadataSuggester: Send + Sync {
    fn suggest(&self, url: &str) -> Option<LinkMetadata>;
}

/// Used when no API key is configured.
pub struct NoSuggester;

impl MetadataSuggester for NoSuggester {
    fn suggest(&self, _url: &str) -> Option<LinkMetadata> {
        None
    }
}

pub struct GeminiSuggester {
    api_key: String,
    model:   String,
    client:  Client,
}

impl GeminiSuggester {
    pub fn new(api_key: String, model: String) -> Option<Self> {
        if api_key.trim().is_empty() {
            return None;
        }
        let client = Client::builder().timeout(SUGGEST_TIMEOUT).build().ok()?;
        Some(Self { api_key, model, client })
    }

    fn request_body(url: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": format!(
                    "Analyze the URL {} and suggest professional metadata for a corporate link hub. \
                     Return a short description (max 80 characters), a logical category \
                     (e.g. Tools, HR, IT) and a Lucide icon name (e.g. Box, Globe, Shield, Terminal).",
                    url
                )}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "description": { "type": "STRING" },
                        "category":    { "type": "STRING" },
                        "icon":        { "type": "STRING" }
                    },
                    "required": ["description", "category", "icon"]
                }
            }
        })
    }

    fn try_suggest(&self, url: &str) -> anyhow::Result<Option<LinkMetadata>> {
        let endpoint = format!("{}/{}:generateContent", GEMINI_BASE, self.model);
        let resp: Value = self.client
            .post(endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(url))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(parse_response(&resp))
    }
}

impl MetadataSuggester for GeminiSuggester {
    fn suggest(&self, url: &str) -> Option<LinkMetadata> {
        match self.try_suggest(url) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "metadata suggestion failed");
                None
            }
        }
    }
}

/// Pull the JSON text of the first candidate and decode it.
fn parse_response(resp: &Value) -> Option<LinkMetadata> {
    let text = resp.pointer("/candidates/0/content/parts/0/text")?.as_str()?;
    serde_json::from_str(text.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_candidate_text() {
        let resp = json!({
            "candidates": [{ "content": { "parts": [{
                "text": " {\"description\":\"Team wiki\",\"category\":\"IT\",\"icon\":\"Book\"} "
            }]}}]
        });
        assert_eq!(parse_response(&resp), Some(LinkMetadata {
            description: "Team wiki".into(), category: "IT".into(), icon: "Book".into(),
        }));
    }

    #[test]
    fn garbage_response_is_none() {
        assert_eq!(parse_response(&json!({})), None);
        let resp = json!({ "candidates": [{ "content": { "parts": [{ "text": "sorry" }]}}] });
        assert_eq!(parse_response(&resp), None);
    }

    #[test]
    fn missing_key_yields_no_client() {
        assert!(GeminiSuggester::new(String::new(), "gemini-flash".into()).is_none());
        assert_eq!(NoSuggester.suggest("https://x.test"), None);
    }

    #[test]
    fn request_asks_for_json_schema() {
        let body = GeminiSuggester::request_body("https://x.test");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!(body["contents"][0]["parts"][0]["text"].as_str().unwrap().contains("https://x.test"));
    }
}
