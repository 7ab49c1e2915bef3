/*!
 * Tests for ruby annotation parsing, phoneme markup and rendering
 */

use regex::Regex;
use reibun::annotation::{
    RubyDisplay, TextChunk, find_spans, parse_annotated, render_line, strip_annotations,
    to_speech_markup, wrap_speak,
};

use crate::common;

/// Lines covering plain, annotated, adjacent and malformed markup
const LINES: &[&str] = &[
    "",
    "ただのテキスト",
    "この<ruby>箱<rt>はこ</rt></ruby>の<ruby>中<rt>なか</rt></ruby>には",
    "<ruby>今日<rt>きょう</rt></ruby><ruby>明日<rt>あした</rt></ruby>",
    "<ruby>空<rt></rt></ruby>と<ruby><rt>よみ</rt></ruby>",
    "<ruby>壊れた<rt>こわれた</ruby>まま",
    "<RUBY>大<RT>おお</RT></RUBY>文字",
];

#[test]
fn test_parse_withAnyLine_shouldReconstructStrippedText() {
    let ruby = Regex::new(r"<ruby>(.*?)<rt>(.*?)</rt></ruby>").unwrap();
    for line in LINES {
        let joined: String = parse_annotated(line).iter().map(|c| c.text.as_str()).collect();
        let expected = ruby.replace_all(line, "${1}");
        assert_eq!(joined, expected, "line: {}", line);
        assert_eq!(strip_annotations(line), expected, "line: {}", line);
    }
}

#[test]
fn test_parse_withAnyLine_shouldEmitOneAnnotatedChunkPerSpan() {
    for line in LINES {
        let annotated: Vec<_> = parse_annotated(line)
            .into_iter()
            .filter(TextChunk::is_annotated)
            .collect();
        let spans: Vec<_> = find_spans(line).collect();
        assert_eq!(annotated.len(), spans.len(), "line: {}", line);
        for (chunk, span) in annotated.iter().zip(&spans) {
            assert_eq!(chunk.text, span.base);
            assert_eq!(chunk.pronunciation.as_deref(), Some(span.reading));
        }
    }
}

#[test]
fn test_parse_withAnyLine_shouldNeverEmitEmptyPlainChunk() {
    for line in LINES {
        assert!(
            parse_annotated(line)
                .iter()
                .all(|c| c.is_annotated() || !c.text.is_empty()),
            "line: {}",
            line
        );
    }
}

#[test]
fn test_parse_withScenarioLine_shouldMatchExpectedChunks() {
    let chunks = parse_annotated(LINES[2]);
    assert_eq!(
        chunks,
        vec![
            TextChunk::plain("この"),
            TextChunk::annotated("箱", "はこ"),
            TextChunk::plain("の"),
            TextChunk::annotated("中", "なか"),
            TextChunk::plain("には"),
        ]
    );
}

#[test]
fn test_parse_withUppercaseTags_shouldTreatAsPlainText() {
    let line = LINES[6];
    assert_eq!(parse_annotated(line), vec![TextChunk::plain(line)]);
    assert_eq!(to_speech_markup(line), line);
}

#[test]
fn test_markup_withoutSpans_shouldBeIdentity() {
    for line in ["", "ただのテキスト", "<ruby>壊れた<rt>こわれた</ruby>まま"] {
        assert_eq!(to_speech_markup(line), line);
    }
}

#[test]
fn test_markup_withSurroundingText_shouldReplaceOnlySpan() {
    assert_eq!(
        to_speech_markup("a<ruby>箱<rt>はこ</rt></ruby>b"),
        "a<phoneme type=\"ruby\" ph=\"はこ\">箱</phoneme>b"
    );
}

#[test]
fn test_markup_withDialogueLines_shouldRemoveAllRubyTags() {
    for line in common::DIALOGUE {
        let markup = wrap_speak(&to_speech_markup(line));
        assert!(markup.starts_with("<speak>"));
        assert!(markup.ends_with("</speak>"));
        assert!(!markup.contains("<ruby>"));
        assert!(!markup.contains("<rt>"));
        assert_eq!(markup.matches("<phoneme").count(), find_spans(line).count());
    }
}

#[test]
fn test_render_withEachDisplay_shouldFormatReadings() {
    let chunks = parse_annotated(LINES[2]);
    assert_eq!(render_line(&chunks, RubyDisplay::Inline), "この箱(はこ)の中(なか)には");
    assert_eq!(render_line(&chunks, RubyDisplay::Html), LINES[2]);
    assert_eq!(render_line(&chunks, RubyDisplay::Hidden), "この箱の中には");
}

#[test]
fn test_chunk_serialization_shouldOmitMissingPronunciation() {
    let json = serde_json::to_string(&parse_annotated("この<ruby>箱<rt>はこ</rt></ruby>")).unwrap();
    assert_eq!(json, r#"[{"text":"この"},{"text":"箱","pronunciation":"はこ"}]"#);
}
