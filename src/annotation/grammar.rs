/*!
 * Recognition of `<ruby>BASE<rt>READING</rt></ruby>` spans.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Ruby span pattern. Both groups are non-greedy, tag names are case-sensitive
/// and there is no escaping, so a literal `<rt>` or `</ruby>` inside BASE or
/// READING ends the group early.
pub(crate) static RUBY_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<ruby>(.*?)<rt>(.*?)</rt></ruby>").unwrap()
});

/// One annotation span found in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpan<'a> {
    /// Byte range of the whole span, tags included
    pub range: Range<usize>,
    /// Base (orthographic) text
    pub base: &'a str,
    /// Reading text
    pub reading: &'a str,
}

impl<'a> AnnotationSpan<'a> {
    pub(crate) fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            range: whole.range(),
            base: caps.get(1).map_or("", |m| m.as_str()),
            reading: caps.get(2).map_or("", |m| m.as_str()),
        })
    }
}

/// Find all non-overlapping spans in left-to-right order
pub fn find_spans(line: &str) -> impl Iterator<Item = AnnotationSpan<'_>> {
    RUBY_SPAN_REGEX
        .captures_iter(line)
        .filter_map(|caps| AnnotationSpan::from_captures(&caps))
}
