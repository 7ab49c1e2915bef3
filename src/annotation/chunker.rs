/*!
 * Splitting annotated lines into display chunks.
 */

use serde::{Deserialize, Serialize};

use super::grammar::find_spans;

/// A run of display text, optionally carrying its reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Text shown to the reader
    pub text: String,

    /// Reading (furigana), present only for chunks that came from a ruby span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}

impl TextChunk {
    /// Create a chunk of plain text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pronunciation: None,
        }
    }

    /// Create a chunk of text with a reading
    pub fn annotated(text: impl Into<String>, pronunciation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pronunciation: Some(pronunciation.into()),
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.pronunciation.is_some()
    }
}

/// Parse one annotated line into ordered chunks.
///
/// Plain text between spans becomes a chunk only when non-empty; every span
/// becomes a chunk even if its base or reading is empty. Incomplete markup is
/// not recognised and stays in the plain text.
pub fn parse_annotated(line: &str) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut cursor = 0;

    for span in find_spans(line) {
        if span.range.start > cursor {
            let plain = &line[cursor..span.range.start];
            if !plain.is_empty() {
                chunks.push(TextChunk::plain(plain));
            }
        }

        chunks.push(TextChunk::annotated(span.base, span.reading));
        cursor = span.range.end;
    }

    if cursor < line.len() {
        chunks.push(TextChunk::plain(&line[cursor..]));
    }

    chunks
}

/// The line with every span replaced by its base text
pub fn strip_annotations(line: &str) -> String {
    parse_annotated(line)
        .into_iter()
        .map(|chunk| chunk.text)
        .collect()
}
