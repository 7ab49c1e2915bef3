use async_trait::async_trait;
use futures::stream::StreamExt;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use super::{TextGenerator, TextStream, api_error, request_error};
use super::stream::lines;

/// Ollama client streaming `/api/generate` responses as NDJSON
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: Url,
    /// HTTP client for making requests
    client: Client,
    /// Model name to use for generation
    model: String,
    /// Sampling temperature
    temperature: Option<f32>,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// One streamed line from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text fragment
    #[serde(default)]
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Error reported mid-stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationRequest {
    /// Create a new streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: None,
            stream: true,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
        });
        self
    }
}

impl Ollama {
    /// Create a new Ollama client for the given base URL
    pub fn new(endpoint: &str, model: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let mut base_url = Url::parse(endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid Ollama endpoint {}: {}", endpoint, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            model: model.into(),
            temperature: None,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn generate_url(&self) -> Result<Url, ProviderError> {
        self.base_url.join("api/generate")
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid Ollama URL: {}", e)))
    }

    /// Parse one NDJSON line; blank lines yield nothing
    pub fn parse_stream_line(line: &str) -> Option<Result<String, ProviderError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<GenerationResponse>(line) {
            Ok(GenerationResponse { error: Some(message), .. }) => {
                Some(Err(ProviderError::ApiError { status_code: 500, message }))
            }
            Ok(response) => Some(Ok(response.response)),
            Err(e) => Some(Err(ProviderError::ParseError(format!("Ollama stream line: {}", e)))),
        }
    }
}

#[async_trait]
impl TextGenerator for Ollama {
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, ProviderError> {
        let mut request = GenerationRequest::new(&self.model, prompt);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        debug!("Requesting Ollama stream from model {}", self.model);
        let response = self.client.post(self.generate_url()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error("Ollama", e))?;

        if !response.status().is_success() {
            return Err(api_error("Ollama", response).await);
        }

        let fragments = lines(Box::pin(response.bytes_stream()))
            .filter_map(|line| async move {
                match line {
                    Ok(line) => Ollama::parse_stream_line(&line),
                    Err(e) => Some(Err(e)),
                }
            });

        Ok(fragments.boxed())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
