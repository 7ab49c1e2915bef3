use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, debug};
use std::fmt::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::annotation::RubyDisplay;
use crate::app_config::Config;
use crate::file_utils::{FileManager, SavedDialogue};
use crate::generation::{GenerationOutput, GenerationService};
use crate::kanji::{KanjiCandidate, KanjiTable};

// @module: Application controller for dialogue generation

/// Main application controller for dialogue generation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Collaborator clients, built once
    service: GenerationService,
    // @field: Kanji readings to pick targets from
    kanji_table: KanjiTable,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = GenerationService::from_config(&config)?;
        let kanji_table = Self::load_kanji_table(&config)?;
        Ok(Self::with_service(config, service, kanji_table))
    }

    /// Create a controller around an existing service
    pub fn with_service(config: Config, service: GenerationService, kanji_table: KanjiTable) -> Self {
        Self { config, service, kanji_table }
    }

    /// Kanji table from the configured path, or the built-in one
    pub fn load_kanji_table(config: &Config) -> Result<KanjiTable> {
        match &config.kanji_list_path {
            Some(path) => {
                let table = KanjiTable::load(path)?;
                info!("Loaded {} kanji from {:?}", table.entries().len(), path);
                Ok(table)
            }
            None => Ok(KanjiTable::builtin()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &GenerationService {
        &self.service
    }

    /// Choose the reading to exercise, random unless pinned
    pub fn select_target(&self, kanji: Option<&str>, reading: Option<&str>) -> Result<KanjiCandidate> {
        let mut rng = rand::rng();
        let target = match kanji {
            Some(kanji) => self
                .kanji_table
                .select_for(kanji, reading, &mut rng)
                .with_context(|| match reading {
                    Some(reading) => format!("No reading {} for kanji {} in the kanji table", reading, kanji),
                    None => format!("Kanji {} is not in the kanji table", kanji),
                })?,
            None => self.kanji_table.select_random(&mut rng)?,
        };
        debug!("Selected target: {} ({} reading {})", target.kanji, target.reading_type, target.pronounce);
        Ok(target)
    }

    /// Run a full cycle for the target, print the dialogue and save it under the output root
    pub async fn run(&self, target: &KanjiCandidate, display: RubyDisplay, output_root: &Path) -> Result<SavedDialogue> {
        let start_time = Instant::now();

        let output = self.generate_with_progress(target).await?;
        println!("{}", Self::format_dialogue(&output, display));

        let saved = FileManager::save_dialogue(&output, output_root)?;
        info!(
            "Saved {} clips to {} in {}",
            saved.audio_files.len(),
            saved.dir.display(),
            Self::format_duration(start_time.elapsed())
        );
        Ok(saved)
    }

    /// Run a cycle with a progress bar over the synthesis phase
    pub async fn generate_with_progress(&self, target: &KanjiCandidate) -> Result<GenerationOutput> {
        let progress_bar = ProgressBar::new(0);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Synthesizing");

        let result = self
            .service
            .generate_with_progress(target, |done, total| {
                progress_bar.set_length(total as u64);
                progress_bar.set_position(done as u64);
            })
            .await;

        match result {
            Ok(output) => {
                progress_bar.finish_with_message("Done");
                Ok(output)
            }
            Err(e) => {
                progress_bar.abandon_with_message("Failed");
                Err(e).context("Generation cycle failed")
            }
        }
    }

    /// Dialogue as printable text: header, then each line with its translation
    pub fn format_dialogue(output: &GenerationOutput, display: RubyDisplay) -> String {
        let target = &output.target;
        let mut text = format!(
            "{} [{}] {}\n",
            target.kanji,
            target.reading_type.korean_label(),
            target.pronounce
        );
        for sentence in &output.sentences {
            let speaker = if sentence.index % 2 == 0 { 'A' } else { 'B' };
            let _ = write!(
                text,
                "\n{}: {}\n   {}\n",
                speaker,
                sentence.render(display),
                sentence.translation
            );
        }
        text
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
