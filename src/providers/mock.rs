/*!
 * Mock collaborator implementations for testing.
 *
 * - `MockTextGenerator::working(text)` - streams the text in small fragments
 * - `MockTextGenerator::failing()` - rejects the request
 * - `MockTextGenerator::failing_mid_stream(text)` - streams part of the text, then errors
 * - `MockSpeechSynthesizer::working()` - returns a fake clip and records requests
 * - `MockSpeechSynthesizer::failing_at(n)` - fails the n-th request (0-based)
 */

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::audio::AudioClip;
use crate::errors::ProviderError;
use super::{SpeechRequest, SpeechSynthesizer, TextGenerator, TextStream};

/// Behavior mode for the mock text generator
#[derive(Debug, Clone, PartialEq)]
pub enum MockGeneration {
    /// Streams the text successfully
    Working(String),
    /// Rejects the request before streaming
    Failing,
    /// Streams the first half of the text, then fails
    FailingMidStream(String),
}

/// Mock text generator
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    behavior: MockGeneration,
    /// Characters per streamed fragment
    fragment_chars: usize,
    /// Prompts received, in order
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    pub fn new(behavior: MockGeneration) -> Self {
        Self {
            behavior,
            fragment_chars: 7,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working(text: impl Into<String>) -> Self {
        Self::new(MockGeneration::Working(text.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockGeneration::Failing)
    }

    pub fn failing_mid_stream(text: impl Into<String>) -> Self {
        Self::new(MockGeneration::FailingMidStream(text.into()))
    }

    /// Set the fragment size in characters
    pub fn with_fragment_chars(mut self, fragment_chars: usize) -> Self {
        self.fragment_chars = fragment_chars.max(1);
        self
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Split text into fragments of at most `size` characters
    pub fn fragment(text: &str, size: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars.chunks(size.max(1)).map(|c| c.iter().collect()).collect()
    }

    /// Build an 8-line dialogue response with the given dialogue and translations
    pub fn dialogue_response(dialogue: &[&str], translations: &[&str]) -> String {
        dialogue.iter().chain(translations.iter()).copied().collect::<Vec<_>>().join("\n")
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, ProviderError> {
        self.prompts.lock().push(prompt.to_string());

        match &self.behavior {
            MockGeneration::Working(text) => {
                let fragments = Self::fragment(text, self.fragment_chars);
                Ok(stream::iter(fragments.into_iter().map(Ok::<String, ProviderError>)).boxed())
            }
            MockGeneration::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated generation failure".to_string(),
            }),
            MockGeneration::FailingMidStream(text) => {
                let half: String = text.chars().take(text.chars().count() / 2).collect();
                let items = vec![
                    Ok(half),
                    Err(ProviderError::ConnectionError("Simulated stream reset".to_string())),
                ];
                Ok(stream::iter(items).boxed())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock speech synthesizer recording every request
#[derive(Debug, Clone, Default)]
pub struct MockSpeechSynthesizer {
    /// Fail the request with this 0-based index
    fail_at: Option<usize>,
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl MockSpeechSynthesizer {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().clone()
    }

    /// Fake audio payload identifying the request
    pub fn fake_audio(request: &SpeechRequest) -> Vec<u8> {
        format!("{}|{}", request.voice_id, request.text).into_bytes()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if self.fail_at == Some(count) {
            return Err(ProviderError::ApiError {
                status_code: 400,
                message: format!("Simulated synthesis failure (request #{})", count + 1),
            });
        }

        Ok(AudioClip::new(Self::fake_audio(request), request.output_format))
    }
}
