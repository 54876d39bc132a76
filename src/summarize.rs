//! Summarizer backed by the Gemini generateContent API.
//!
//! The model is asked for a fixed shape (60-word summary, then a bullet-point
//! list under a known header) but nothing guarantees it complies; parsing is
//! best-effort and an absent header yields an empty bullet list, not an error.

use log::debug;

use crate::{Error, Summarizer, Summary};

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const BULLET_HEADER: &str = "10 Important Bullet Points:";

/// Summarizer provider calling Gemini over REST.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self { client, api_key, model }
    }

    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        debug!("Summarizing via Gemini API with model {}", self.model);

        let url = format!("{GEMINI_ENDPOINT}/{}:generateContent", self.model);
        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ]
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("Gemini API returned {status}: {body}")));
        }

        let json: serde_json::Value = resp.json().await?;
        extract_gemini_text(&json)
    }
}

#[async_trait::async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, transcript_text: &str) -> Result<Summary, Error> {
        let prompt = format!(
            "Summarize this YouTube transcript in 60 words and provide '10 important bullet points:'\n\n{transcript_text}"
        );
        let raw = self.generate(&prompt).await?;
        Ok(parse_summary(&raw))
    }
}

fn extract_gemini_text(json: &serde_json::Value) -> Result<String, Error> {
    if let Some(parts) = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text")?.as_str().map(|s| s.to_string()))
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    Err(Error::Upstream("unexpected Gemini API response format".to_string()))
}

/// Parse the model's free-text response into a summary plus bullet points.
///
/// The first line is the summary; the bullet list is whatever follows the
/// literal header, one line per point. No header means no bullets.
pub fn parse_summary(raw: &str) -> Summary {
    let cleaned = raw.replace('*', "");
    let cleaned = cleaned.trim();

    let (summary, rest) = match cleaned.split_once('\n') {
        Some((first, rest)) => (first.trim(), rest.trim()),
        None => (cleaned, ""),
    };

    let bullet_points = match rest.find(BULLET_HEADER) {
        Some(idx) => rest[idx + BULLET_HEADER.len()..]
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(unescape_quotes)
            .collect(),
        None => Vec::new(),
    };

    Summary {
        summary: unescape_quotes(summary),
        bullet_points,
    }
}

/// Replace the model's escaped double quotes with plain single quotes.
fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "'").trim().to_string()
}
