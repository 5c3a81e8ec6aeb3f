//! Gemini `generateContent` client.
//!
//! Blocking reqwest client; no async runtime is required. Call it from a
//! worker thread (see [`crate::task::ReportState`]).

use std::time::Duration;

use openfield_model::{Dataset, Metric};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    generator::{ReportError, ReportGenerator},
    prompt, summary,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the report service.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ReportConfig {
    /// Drops an empty key so it is reported as missing rather than sent.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    config: ReportConfig,
}

impl GeminiClient {
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("openfield/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReportError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Sends `prompt` and returns the concatenated text of the first candidate.
    pub fn complete(&self, prompt: &str) -> Result<String, ReportError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ReportError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending generateContent");
        let response = self
            .http
            .post(self.config.url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .map_err(|e| ReportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ReportError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or(body, |err| err.error.message);
            return Err(ReportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(&body)
    }
}

impl ReportGenerator for GeminiClient {
    fn generate(&self, dataset: &Dataset, metrics: &[Metric]) -> Result<String, ReportError> {
        if self.config.api_key.is_none() {
            return Err(ReportError::MissingApiKey);
        }
        let data_summary = summary::render_data_summary(dataset, metrics);
        self.complete(&prompt::build_prompt(&data_summary))
    }
}

fn parse_response(body: &str) -> Result<String, ReportError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ReportError::Parse(e.to_string()))?;
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ReportError::EmptyResponse);
    }
    Ok(text)
}
