/*!
 * Clients for the two collaborator services.
 *
 * - Text generation: streams the raw annotated dialogue
 *   - `gemini`: Google Gemini `streamGenerateContent` (SSE)
 *   - `ollama`: local Ollama server (NDJSON)
 * - Speech synthesis: turns phoneme markup into audio
 *   - `polly`: Amazon Polly, signed with `sigv4`
 * - `mock`: in-memory stand-ins for tests
 */

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::Serialize;
use std::fmt::Debug;

use crate::audio::{AudioClip, OutputFormat};
use crate::errors::ProviderError;

/// Stream of generated text fragments
pub type TextStream = BoxStream<'static, Result<String, ProviderError>>;

/// A service producing text from a prompt, fragment by fragment
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Start generating text for the prompt
    ///
    /// # Returns
    /// * `Result<TextStream, ProviderError>` - The fragment stream, or an error if the request was rejected
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, ProviderError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Whether the request text is plain or markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Text,
    Ssml,
}

/// One synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    /// Text or markup to speak
    pub text: String,
    pub text_type: TextType,
    /// Locale such as `ja-JP`
    pub language_code: String,
    /// Engine identifier such as `neural`
    pub engine: String,
    pub voice_id: String,
    pub output_format: OutputFormat,
}

/// A service turning text into audio
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize one request into an audio clip
    async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, ProviderError>;
}

/// Map a transport error from reqwest onto a provider error
pub(crate) fn request_error(service: &str, error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(format!("{}: {}", service, error))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", service, error))
    }
}

/// Turn a non-success HTTP response into an API error
pub(crate) async fn api_error(service: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", service, status, message);
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        code => ProviderError::ApiError { status_code: code, message },
    }
}

pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod polly;
pub mod sigv4;
pub mod stream;
