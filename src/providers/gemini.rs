use async_trait::async_trait;
use futures::stream::StreamExt;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use super::{TextGenerator, TextStream, api_error, request_error};
use super::stream::lines;

/// Gemini client streaming `generateContent` responses over SSE
#[derive(Debug, Clone)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Model name, e.g. `gemini-2.5-pro`
    model: String,
    /// Sampling temperature
    temperature: Option<f32>,
}

/// Request body for `streamGenerateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// One turn of the conversation
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Content part; only text parts are used
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

/// One SSE event payload
#[derive(Debug, Deserialize)]
pub struct GeminiStreamChunk {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub error: Option<GeminiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl GeminiRequest {
    /// Single user turn with the given prompt
    pub fn user_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: Some(prompt.into()) }],
            }],
            generation_config: None,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config = Some(GenerationConfig { temperature });
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// Extract the text of one SSE line; non-data lines yield nothing
    pub fn parse_event_line(line: &str) -> Option<Result<String, ProviderError>> {
        let payload = line.strip_prefix("data:")?.trim();
        if payload.is_empty() {
            return None;
        }

        let chunk: GeminiStreamChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => return Some(Err(ProviderError::ParseError(format!("Gemini stream event: {}", e)))),
        };

        if let Some(error) = chunk.error {
            return Some(Err(ProviderError::ApiError {
                status_code: error.code,
                message: error.message,
            }));
        }

        Some(Ok(Self::extract_text(&chunk)))
    }

    /// Concatenate the text parts of the first candidate
    pub fn extract_text(chunk: &GeminiStreamChunk) -> String {
        chunk.candidates.first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content.parts.iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for Gemini {
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, ProviderError> {
        let mut request = GeminiRequest::user_prompt(prompt);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        debug!("Requesting Gemini stream from model {}", self.model);
        let response = self.client.post(self.stream_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error("Gemini", e))?;

        if !response.status().is_success() {
            return Err(api_error("Gemini", response).await);
        }

        let events = lines(Box::pin(response.bytes_stream()))
            .filter_map(|line| async move {
                match line {
                    Ok(line) => Gemini::parse_event_line(&line),
                    Err(e) => Some(Err(e)),
                }
            });

        Ok(events.boxed())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
