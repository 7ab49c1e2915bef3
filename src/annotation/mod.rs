/*!
 * Ruby annotation handling for generated dialogue lines.
 *
 * The generator marks readings inline as `<ruby>BASE<rt>READING</rt></ruby>`.
 * This module turns such a line into:
 *
 * - `chunker`: an ordered list of display chunks (plain text or text with a reading)
 * - `phoneme`: speech-synthesis markup carrying the readings as phoneme hints
 * - `render`: terminal/HTML renderings of a chunk list
 *
 * Both the chunker and the phoneme converter recognise spans through the
 * single pattern defined in `grammar`.
 */

pub mod chunker;
pub mod grammar;
pub mod phoneme;
pub mod render;

pub use self::chunker::{TextChunk, parse_annotated, strip_annotations};
pub use self::grammar::{AnnotationSpan, find_spans};
pub use self::phoneme::{to_speech_markup, wrap_speak};
pub use self::render::{RubyDisplay, render_line};
