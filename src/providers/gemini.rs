use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::QuestionGenerator;

const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(serde::Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(serde::Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(serde::Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

pub struct GeminiGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGenerator {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl QuestionGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let api_key = match &self.api_key {
            Some(api_key) if !api_key.is_empty() => api_key,
            _ => anyhow::bail!("GEMINI_API_KEY is not configured"),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response: GenerateContentResponse = self
            .client
            .post(&url)
            .timeout(GENERATION_TIMEOUT)
            .query(&[("key", api_key.as_str())])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            anyhow::bail!("gemini returned no text");
        }

        Ok(text)
    }
}

/// Strips the markdown code fences models like to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
