use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::audio::AudioClip;
use crate::errors::ProviderError;
use super::sigv4::{self, Credentials, SigningInput};
use super::{SpeechRequest, SpeechSynthesizer, TextType, api_error, request_error};

const SERVICE: &str = "polly";
const SPEECH_PATH: &str = "/v1/speech";
const CONTENT_TYPE: &str = "application/json";

/// Amazon Polly client using the `SynthesizeSpeech` REST endpoint
#[derive(Debug, Clone)]
pub struct Polly {
    /// HTTP client for API requests
    client: Client,
    /// Service base URL, e.g. `https://polly.ap-northeast-2.amazonaws.com`
    endpoint: Url,
    /// Region used in the signing scope
    region: String,
    credentials: Credentials,
}

/// `SynthesizeSpeech` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynthesizeSpeechBody<'a> {
    engine: &'a str,
    language_code: &'a str,
    output_format: &'a str,
    text: &'a str,
    text_type: TextType,
    voice_id: &'a str,
}

impl<'a> From<&'a SpeechRequest> for SynthesizeSpeechBody<'a> {
    fn from(request: &'a SpeechRequest) -> Self {
        Self {
            engine: &request.engine,
            language_code: &request.language_code,
            output_format: request.output_format.as_str(),
            text: &request.text,
            text_type: request.text_type,
            voice_id: &request.voice_id,
        }
    }
}

impl Polly {
    /// Create a new Polly client
    pub fn new(
        endpoint: &str,
        region: impl Into<String>,
        credentials: Credentials,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid Polly endpoint {}: {}", endpoint, e)))?;
        if endpoint.host_str().is_none() {
            return Err(ProviderError::RequestFailed(format!("Polly endpoint has no host: {}", endpoint)));
        }

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint,
            region: region.into(),
            credentials,
        })
    }

    /// Host header value, including a non-default port
    fn host(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    fn speech_url(&self) -> Result<Url, ProviderError> {
        self.endpoint.join(SPEECH_PATH)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid Polly URL: {}", e)))
    }
}

#[async_trait]
impl SpeechSynthesizer for Polly {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, ProviderError> {
        let body = serde_json::to_vec(&SynthesizeSpeechBody::from(request))
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to encode Polly request: {}", e)))?;

        let host = self.host();
        let signed = sigv4::sign(
            &SigningInput {
                method: "POST",
                host: &host,
                path: SPEECH_PATH,
                content_type: CONTENT_TYPE,
                body: &body,
                region: &self.region,
                service: SERVICE,
            },
            &self.credentials,
            Utc::now(),
        )?;

        debug!("Synthesizing {} chars with voice {}", request.text.chars().count(), request.voice_id);
        let mut builder = self.client.post(self.speech_url()?)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", &signed.authorization);
        if let Some(token) = &signed.session_token {
            builder = builder.header("X-Amz-Security-Token", token);
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| request_error("Polly", e))?;

        if !response.status().is_success() {
            return Err(api_error("Polly", response).await);
        }

        let audio = response.bytes().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read Polly audio stream: {}", e)))?;

        Ok(AudioClip::new(audio, request.output_format))
    }
}
