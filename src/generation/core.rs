/*!
 * Core generation service.
 *
 * One cycle: prompt the text generator, buffer its whole streamed answer,
 * pair dialogue lines with translations, then for each line parse the ruby
 * chunks and synthesize narration from the phoneme markup.
 */

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::annotation::{parse_annotated, to_speech_markup, wrap_speak};
use crate::app_config::{Config, GenerationProvider};
use crate::audio::OutputFormat;
use crate::errors::GenerationError;
use crate::kanji::KanjiCandidate;
use crate::language_utils;
use crate::providers::gemini::Gemini;
use crate::providers::ollama::Ollama;
use crate::providers::polly::Polly;
use crate::providers::sigv4::Credentials;
use crate::providers::stream::collect_text;
use crate::providers::{SpeechRequest, SpeechSynthesizer, TextGenerator, TextType};

use super::lines::{DialoguePair, non_blank_lines, pair_dialogue};
use super::prompts::PromptTemplate;
use super::record::{GenerationOutput, SentenceRecord};

/// Voices of the two speakers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerVoices {
    /// Speaker A, who says the even-numbered lines
    pub a: String,
    /// Speaker B, who says the odd-numbered lines
    pub b: String,
}

impl SpeakerVoices {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self { a: a.into(), b: b.into() }
    }

    /// Voice for a dialogue line, alternating by parity
    pub fn for_line(&self, index: usize) -> &str {
        if index % 2 == 0 { &self.a } else { &self.b }
    }
}

impl Default for SpeakerVoices {
    fn default() -> Self {
        Self::new("Takumi", "Tomoko")
    }
}

/// Settings of a generation cycle
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Name of the translation language as written in the prompt
    pub translation_language: String,
    /// Locale of the narration
    pub language_code: String,
    /// Speech engine identifier
    pub engine: String,
    pub output_format: OutputFormat,
    pub voices: SpeakerVoices,
    /// Number of sentences synthesized at once
    pub synthesis_concurrency: usize,
    pub prompt: PromptTemplate,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            translation_language: "한국어".to_string(),
            language_code: "ja-JP".to_string(),
            engine: "neural".to_string(),
            output_format: OutputFormat::default(),
            voices: SpeakerVoices::default(),
            synthesis_concurrency: 1,
            prompt: PromptTemplate::default(),
        }
    }
}

impl GenerationOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        let translation_language = language_utils::get_native_name(&config.translation_language)
            .context("Invalid translation language")?;

        let voices = match config.speech.voices.as_slice() {
            [a, b] => SpeakerVoices::new(a.clone(), b.clone()),
            _ => anyhow::bail!("Exactly two speaker voices must be configured"),
        };

        Ok(Self {
            translation_language,
            language_code: config.speech.language_code.clone(),
            engine: config.speech.engine.clone(),
            output_format: config.speech.output_format,
            voices,
            synthesis_concurrency: config.speech.synthesis_concurrency.max(1),
            prompt: PromptTemplate::default(),
        })
    }
}

/// Runs generation cycles against the configured collaborators
#[derive(Debug, Clone)]
pub struct GenerationService {
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    pub options: GenerationOptions,
}

impl GenerationService {
    /// Create a service from explicit collaborators
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        options: GenerationOptions,
    ) -> Self {
        Self { generator, synthesizer, options }
    }

    /// Build both collaborator clients from the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let generation = &config.generation;
        let generator: Arc<dyn TextGenerator> = match generation.provider {
            GenerationProvider::Gemini => Arc::new(
                Gemini::new(
                    generation.get_api_key(),
                    generation.get_endpoint(),
                    generation.get_model(),
                    generation.get_timeout_secs(),
                )
                .with_temperature(generation.temperature),
            ),
            GenerationProvider::Ollama => Arc::new(
                Ollama::new(
                    &generation.get_endpoint(),
                    generation.get_model(),
                    generation.get_timeout_secs(),
                )?
                .with_temperature(generation.temperature),
            ),
        };

        let speech = &config.speech;
        let synthesizer = Arc::new(Polly::new(
            &speech.resolved_endpoint(),
            speech.region.clone(),
            Credentials {
                access_key_id: speech.resolved_access_key_id(),
                secret_access_key: speech.resolved_secret_access_key(),
                session_token: speech.resolved_session_token(),
            },
            speech.timeout_secs,
        )?);

        info!(
            "Using {} ({}) for generation and Polly ({}) for speech",
            generation.provider.display_name(),
            generation.get_model(),
            speech.region
        );

        Ok(Self::new(generator, synthesizer, GenerationOptions::from_config(config)?))
    }

    /// Run one full cycle for the target reading
    pub async fn generate(&self, target: &KanjiCandidate) -> Result<GenerationOutput, GenerationError> {
        self.generate_with_progress(target, |_, _| {}).await
    }

    /// Run one full cycle, reporting synthesis progress as (done, total)
    pub async fn generate_with_progress(
        &self,
        target: &KanjiCandidate,
        progress: impl Fn(usize, usize) + Send + Sync,
    ) -> Result<GenerationOutput, GenerationError> {
        let start_time = Instant::now();
        let raw = self.request_dialogue(target).await?;
        let sentences = self.build_sentences(&raw, progress).await?;
        info!("Generated {} sentences in {:.1?}", sentences.len(), start_time.elapsed());
        Ok(GenerationOutput::new(target.clone(), sentences))
    }

    /// Prompt the generator and buffer its whole answer
    pub async fn request_dialogue(&self, target: &KanjiCandidate) -> Result<String, GenerationError> {
        let prompt = self.options.prompt.render(target, &self.options.translation_language);
        info!(
            "Generating dialogue for {} ({} reading {}) with {}",
            target.kanji, target.reading_type, target.pronounce, self.generator.name()
        );

        let fragments = self.generator.stream_text(&prompt).await?;
        let raw = collect_text(fragments).await?;
        debug!("Generator output:\n{}", raw);
        Ok(raw)
    }

    /// Turn buffered generator output into the four sentence records
    pub async fn build_sentences(
        &self,
        raw_output: &str,
        progress: impl Fn(usize, usize) + Send + Sync,
    ) -> Result<Vec<SentenceRecord>, GenerationError> {
        let lines = non_blank_lines(raw_output);
        let pairs = pair_dialogue(&lines)?;

        let total = pairs.len();
        let completed = AtomicUsize::new(0);
        let completed = &completed;
        let progress = &progress;

        // buffered() yields in input order regardless of completion order
        stream::iter(pairs)
            .map(move |pair| async move {
                let record = self.build_sentence(pair).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(done, total);
                record
            })
            .buffered(self.options.synthesis_concurrency.max(1))
            .try_collect()
            .await
    }

    /// Synthesis request for one annotated dialogue line
    pub fn speech_request(&self, index: usize, annotated: &str) -> SpeechRequest {
        SpeechRequest {
            text: wrap_speak(&to_speech_markup(annotated)),
            text_type: TextType::Ssml,
            language_code: self.options.language_code.clone(),
            engine: self.options.engine.clone(),
            voice_id: self.options.voices.for_line(index).to_string(),
            output_format: self.options.output_format,
        }
    }

    async fn build_sentence(&self, pair: DialoguePair<'_>) -> Result<SentenceRecord, GenerationError> {
        let chunks = parse_annotated(pair.annotated);
        let request = self.speech_request(pair.index, pair.annotated);

        let audio = self.synthesizer.synthesize(&request).await?;
        debug!(
            "Sentence {} synthesized by {} ({} bytes)",
            pair.index + 1,
            request.voice_id,
            audio.len()
        );

        Ok(SentenceRecord {
            index: pair.index,
            translation: pair.translation.to_string(),
            chunks,
            audio,
            voice_id: request.voice_id,
        })
    }
}
