use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::audio::OutputFormat;

/// Application configuration module
/// This module handles loading, validating and saving the configuration of
/// the two collaborator services and the generation cycle.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language the dialogue is translated into (ISO code)
    #[serde(default = "default_translation_language")]
    pub translation_language: String,

    /// Text generation config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Speech synthesis config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Optional JSON kanji table replacing the built-in one
    #[serde(default)]
    pub kanji_list_path: Option<PathBuf>,

    /// Directory receiving audio clips and manifests
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    // @provider: Google Gemini
    #[default]
    Gemini,
    // @provider: Ollama (local)
    Ollama,
}

impl GenerationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }

    /// Environment variable consulted when no API key is configured
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Ollama => None,
        }
    }
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: GenerationProvider) -> Self {
        match provider_type {
            GenerationProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                timeout_secs: default_generation_timeout_secs(),
            },
            GenerationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_generation_timeout_secs(),
            },
        }
    }
}

/// Text generation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: GenerationProvider,

    /// Available providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Speech synthesis configuration (Amazon Polly)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// AWS region hosting the service
    #[serde(default = "default_speech_region")]
    pub region: String,

    /// Access key id; falls back to `AWS_ACCESS_KEY_ID`
    #[serde(default = "String::new")]
    pub access_key_id: String,

    /// Secret access key; falls back to `AWS_SECRET_ACCESS_KEY`
    #[serde(default = "String::new")]
    pub secret_access_key: String,

    /// Session token for temporary credentials; falls back to `AWS_SESSION_TOKEN`
    #[serde(default)]
    pub session_token: Option<String>,

    /// Endpoint override; empty means the regional public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Synthesis engine
    #[serde(default = "default_speech_engine")]
    pub engine: String,

    /// Locale of the spoken dialogue
    #[serde(default = "default_speech_language_code")]
    pub language_code: String,

    /// Audio format of synthesized clips
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Voices for speaker A (even lines) and speaker B (odd lines)
    #[serde(default = "default_voices")]
    pub voices: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of sentences synthesized at once; 1 keeps calls sequential
    #[serde(default = "default_synthesis_concurrency")]
    pub synthesis_concurrency: usize,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            region: default_speech_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
            endpoint: String::new(),
            engine: default_speech_engine(),
            language_code: default_speech_language_code(),
            output_format: OutputFormat::default(),
            voices: default_voices(),
            timeout_secs: default_timeout_secs(),
            synthesis_concurrency: default_synthesis_concurrency(),
        }
    }
}

impl SpeechConfig {
    /// Access key id, from config or environment
    pub fn resolved_access_key_id(&self) -> String {
        resolve_secret(&self.access_key_id, "AWS_ACCESS_KEY_ID")
    }

    /// Secret access key, from config or environment
    pub fn resolved_secret_access_key(&self) -> String {
        resolve_secret(&self.secret_access_key, "AWS_SECRET_ACCESS_KEY")
    }

    pub fn resolved_session_token(&self) -> Option<String> {
        self.session_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("AWS_SESSION_TOKEN").ok().filter(|t| !t.is_empty()))
    }

    /// Endpoint URL, defaulting to the regional public endpoint
    pub fn resolved_endpoint(&self) -> String {
        if self.endpoint.is_empty() {
            format!("https://polly.{}.amazonaws.com", self.region)
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }
}

fn resolve_secret(configured: &str, env_var: &str) -> String {
    if !configured.is_empty() {
        return configured.to_string();
    }
    std::env::var(env_var).unwrap_or_default()
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_translation_language() -> String {
    "ko".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_generation_timeout_secs() -> u64 {
    // Streamed generation with a large model can take a while
    180
}

fn default_temperature() -> f32 {
    1.0
}

fn default_synthesis_concurrency() -> usize {
    1
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1".to_string()
}

fn default_speech_region() -> String {
    "ap-northeast-2".to_string()
}

fn default_speech_engine() -> String {
    "neural".to_string()
}

fn default_speech_language_code() -> String {
    "ja-JP".to_string()
}

fn default_voices() -> Vec<String> {
    vec!["Takumi".to_string(), "Tomoko".to_string()]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.translation_language)?;
        crate::language_utils::validate_locale_code(&self.speech.language_code)?;

        if self.generation.provider == GenerationProvider::Gemini
            && self.generation.get_api_key().is_empty()
        {
            return Err(anyhow!("Generation API key is required for Gemini provider"));
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            ));
        }

        if self.speech.resolved_access_key_id().is_empty()
            || self.speech.resolved_secret_access_key().is_empty()
        {
            return Err(anyhow!("Speech synthesis requires an access key id and secret access key"));
        }

        if self.speech.voices.len() != 2 || self.speech.voices.iter().any(|v| v.trim().is_empty()) {
            return Err(anyhow!("Exactly two speaker voices must be configured"));
        }

        if self.speech.synthesis_concurrency == 0 {
            return Err(anyhow!("synthesis_concurrency must be at least 1"));
        }

        Ok(())
    }

    /// Load the configuration file, creating it with defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
        Ok(config)
    }

    /// Directory receiving generated output
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        dirs::audio_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("reibun"))
            .unwrap_or_else(|| PathBuf::from("reibun-output"))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation_language: default_translation_language(),
            generation: GenerationConfig::default(),
            speech: SpeechConfig::default(),
            kanji_list_path: None,
            output_dir: None,
            log_level: LogLevel::default(),
        }
    }
}

impl GenerationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &GenerationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            GenerationProvider::Gemini => default_gemini_model(),
            GenerationProvider::Ollama => default_ollama_model(),
        }
    }

    /// Get the API key for the active provider, falling back to its environment variable
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Ollama doesn't use API keys
        self.provider
            .api_key_env_var()
            .and_then(|var| std::env::var(var).ok())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            GenerationProvider::Gemini => default_gemini_endpoint(),
            GenerationProvider::Ollama => default_ollama_endpoint(),
        }
    }

    /// Get the timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_generation_timeout_secs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(GenerationProvider::Gemini),
                ProviderConfig::new(GenerationProvider::Ollama),
            ],
            temperature: default_temperature(),
        }
    }
}
