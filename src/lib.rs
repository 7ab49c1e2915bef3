/*!
 * # reibun - example dialogues for kanji readings
 * 
 * A Rust library that asks an AI model for a short Japanese dialogue
 * exercising one kanji reading, parses the furigana markup of every line and
 * narrates each line with a speech-synthesis service.
 * 
 * ## Features
 * 
 * - Random kanji reading selection from a built-in or custom table
 * - Dialogue generation using AI providers:
 *   - Gemini API
 *   - Ollama (local LLM)
 * - Ruby annotation parsing into display chunks
 * - Phoneme markup for speech synthesis with Amazon Polly
 * - Audio clips, playlist and JSON manifest per dialogue
 * 
 * ## Architecture
 * 
 * The library is organized in these main modules:
 * - `annotation`: Ruby grammar, chunk parser, phoneme converter and display rendering
 * - `generation`: Generation cycle:
 *   - `generation::core`: Prompting, line pairing and synthesis
 *   - `generation::prompts`: Dialogue prompt template
 *   - `generation::lines`: Splitting generator output into dialogue and translations
 *   - `generation::record`: Sentence records and cycle output
 * - `kanji`: Kanji table and random target selection
 * - `audio`: Audio clips and output formats
 * - `app_config`: Configuration management
 * - `file_utils`: Writing dialogues to disk
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the collaborator services:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::polly`: Amazon Polly client
 * - `errors`: Custom error types for the application
 * 
 * ## License
 * 
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod annotation;
pub mod app_config;
pub mod app_controller;
pub mod audio;
pub mod errors;
pub mod file_utils;
pub mod generation;
pub mod kanji;
pub mod language_utils;
pub mod providers;

// Re-export main types for easier usage
pub use annotation::{TextChunk, RubyDisplay, parse_annotated, to_speech_markup, wrap_speak, render_line};
pub use app_config::Config;
pub use audio::{AudioClip, OutputFormat};
pub use generation::{GenerationOutput, GenerationService, SentenceRecord};
pub use kanji::{KanjiCandidate, KanjiTable, ReadingType};
pub use language_utils::{language_codes_match, normalize_to_part3, get_language_name};
pub use errors::{AppError, GenerationError, ProviderError};
