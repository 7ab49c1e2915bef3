/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use reibun::app_config::{Config, GenerationProvider, LogLevel, ProviderConfig};
use reibun::audio::OutputFormat;

use crate::common;

/// Config with every credential filled in
fn complete_config() -> Config {
    let mut config = Config::default();
    config.generation.available_providers[0].api_key = "gemini-key".to_string();
    config.speech.access_key_id = "AKIDEXAMPLE".to_string();
    config.speech.secret_access_key = "secret".to_string();
    config
}

#[test]
fn test_validate_withCompleteConfig_shouldSucceed() {
    assert!(complete_config().validate().is_ok());
}

#[test]
fn test_validate_withInvalidTranslationLanguage_shouldFail() {
    let mut config = complete_config();
    config.translation_language = "123".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withInvalidLocale_shouldFail() {
    let mut config = complete_config();
    config.speech.language_code = "japanese".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withOutOfRangeTemperature_shouldFail() {
    let mut config = complete_config();
    config.generation.temperature = 2.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withThreeVoices_shouldFail() {
    let mut config = complete_config();
    config.speech.voices.push("Kazuha".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroConcurrency_shouldFail() {
    let mut config = complete_config();
    config.speech.synthesis_concurrency = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withOllamaProvider_shouldNotRequireApiKey() {
    let mut config = complete_config();
    config.generation.available_providers[0].api_key.clear();
    config.generation.provider = GenerationProvider::Ollama;
    assert!(config.validate().is_ok());
}

#[test]
fn test_providerAccessors_withMissingProviderEntry_shouldUseDefaults() {
    let mut config = Config::default();
    config.generation.available_providers.clear();
    config.generation.provider = GenerationProvider::Ollama;
    assert_eq!(config.generation.get_model(), "llama3.1");
    assert_eq!(config.generation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.generation.get_timeout_secs(), 180);
}

#[test]
fn test_providerAccessors_withCustomEntry_shouldUseIt() {
    let mut config = Config::default();
    let mut gemini = ProviderConfig::new(GenerationProvider::Gemini);
    gemini.model = "gemini-2.5-flash".to_string();
    gemini.endpoint = "http://localhost:9000".to_string();
    gemini.api_key = "key".to_string();
    config.generation.available_providers = vec![gemini];

    assert_eq!(config.generation.get_model(), "gemini-2.5-flash");
    assert_eq!(config.generation.get_endpoint(), "http://localhost:9000");
    assert_eq!(config.generation.get_api_key(), "key");
}

#[test]
fn test_providerType_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("Gemini".parse::<GenerationProvider>().unwrap(), GenerationProvider::Gemini);
    assert_eq!("OLLAMA".parse::<GenerationProvider>().unwrap(), GenerationProvider::Ollama);
    assert!("openai".parse::<GenerationProvider>().is_err());
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.speech.voices, vec!["Takumi", "Tomoko"]);

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.translation_language, config.translation_language);
    assert_eq!(reloaded.generation.get_model(), config.generation.get_model());
    Ok(())
}

#[test]
fn test_load_or_create_withExistingFile_shouldReadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{
            "translation_language": "en",
            "generation": { "provider": "ollama", "temperature": 0.5 },
            "speech": { "output_format": "mp3", "voices": ["Kazuha", "Takumi"] },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.translation_language, "en");
    assert_eq!(config.generation.provider, GenerationProvider::Ollama);
    assert_eq!(config.generation.temperature, 0.5);
    assert_eq!(config.speech.output_format, OutputFormat::Mp3);
    assert_eq!(config.speech.voices, vec!["Kazuha", "Takumi"]);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    std::fs::write(&path, "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_resolved_output_dir_withOverride_shouldUseIt() {
    let mut config = Config::default();
    config.output_dir = Some("/tmp/reibun-test".into());
    assert_eq!(config.resolved_output_dir(), std::path::PathBuf::from("/tmp/reibun-test"));
}
