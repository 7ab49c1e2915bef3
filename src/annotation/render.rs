/*!
 * Rendering chunk lists for display.
 */

use std::fmt::Write;

use super::chunker::TextChunk;

/// How readings are shown when rendering a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RubyDisplay {
    /// Reading in parentheses after its base text: `箱(はこ)`
    #[default]
    Inline,
    /// HTML ruby markup: `<ruby>箱<rt>はこ</rt></ruby>`
    Html,
    /// Base text only
    Hidden,
}

/// Render chunks as a single display line
pub fn render_line(chunks: &[TextChunk], display: RubyDisplay) -> String {
    let mut out = String::new();
    for chunk in chunks {
        // An empty reading has nothing to show
        match (chunk.pronunciation.as_deref(), display) {
            (Some(reading), RubyDisplay::Inline) if !reading.is_empty() => {
                let _ = write!(out, "{}({})", chunk.text, reading);
            }
            (Some(reading), RubyDisplay::Html) if !reading.is_empty() => {
                let _ = write!(out, "<ruby>{}<rt>{}</rt></ruby>", chunk.text, reading);
            }
            _ => out.push_str(&chunk.text),
        }
    }
    out
}
