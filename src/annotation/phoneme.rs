/*!
 * Conversion of ruby markup into speech-synthesis phoneme markup.
 */

use regex::Captures;

use super::grammar::RUBY_SPAN_REGEX;

/// Phoneme alphabet understood by the speech engine for kana readings
pub const PHONEME_TYPE: &str = "ruby";

/// Replace every ruby span with `<phoneme type="ruby" ph="READING">BASE</phoneme>`.
///
/// Text outside spans is left untouched. Captured text is inserted as-is.
pub fn to_speech_markup(line: &str) -> String {
    RUBY_SPAN_REGEX
        .replace_all(line, |caps: &Captures| {
            format!(
                "<phoneme type=\"{}\" ph=\"{}\">{}</phoneme>",
                PHONEME_TYPE,
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(1).map_or("", |m| m.as_str()),
            )
        })
        .into_owned()
}

/// Wrap converted markup in the engine's root document tag
pub fn wrap_speak(markup: &str) -> String {
    format!("<speak>{}</speak>", markup)
}
