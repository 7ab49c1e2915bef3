/*!
 * Results of a generation cycle.
 */

use uuid::Uuid;

use crate::annotation::{RubyDisplay, TextChunk, render_line};
use crate::audio::AudioClip;
use crate::kanji::KanjiCandidate;

/// One line of dialogue ready for display and playback
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceRecord {
    /// Position in the dialogue (0-based)
    pub index: usize,
    /// Translation of the line
    pub translation: String,
    /// Display chunks parsed from the annotated line
    pub chunks: Vec<TextChunk>,
    /// Synthesized narration
    pub audio: AudioClip,
    /// Voice that spoke the line
    pub voice_id: String,
}

impl SentenceRecord {
    /// Render the Japanese line
    pub fn render(&self, display: RubyDisplay) -> String {
        render_line(&self.chunks, display)
    }
}

/// Everything one generation cycle produced
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Identifier of the cycle
    pub id: Uuid,
    /// Kanji reading the dialogue exercises
    pub target: KanjiCandidate,
    /// The four sentences in dialogue order
    pub sentences: Vec<SentenceRecord>,
}

impl GenerationOutput {
    pub fn new(target: KanjiCandidate, sentences: Vec<SentenceRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            sentences,
        }
    }
}
