/*!
 * Tests for the collaborator clients that do not need a network
 */

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use futures::stream::{self, StreamExt};
use reibun::audio::OutputFormat;
use reibun::errors::ProviderError;
use reibun::providers::gemini::Gemini;
use reibun::providers::ollama::Ollama;
use reibun::providers::polly::{Polly, SynthesizeSpeechBody};
use reibun::providers::sigv4::{self, Credentials, SigningInput};
use reibun::providers::stream::{collect_text, lines};
use reibun::providers::{SpeechRequest, TextType};

fn byte_chunks(chunks: Vec<&[u8]>) -> impl futures::Stream<Item = Result<Bytes, ProviderError>> + Unpin {
    let chunks: Vec<Bytes> = chunks.into_iter().map(Bytes::copy_from_slice).collect();
    stream::iter(chunks.into_iter().map(Ok))
}

#[tokio::test]
async fn test_geminiEvents_splitAcrossChunks_shouldDecodeText() {
    let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"この<ruby>箱\"}]}}]}\r\n\r\n\
                data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"<rt>はこ</rt></ruby>\"}]}}]}\r\n\r\n";
    let bytes = body.as_bytes();
    // Split inside a multi-byte character
    let split = body.find('箱').unwrap() + 1;
    let chunks = vec![&bytes[..split], &bytes[split..]];

    let fragments = lines(byte_chunks(chunks))
        .filter_map(|line| async move {
            match line {
                Ok(line) => Gemini::parse_event_line(&line),
                Err(e) => Some(Err(e)),
            }
        })
        .boxed();

    assert_eq!(collect_text(fragments).await.unwrap(), "この<ruby>箱<rt>はこ</rt></ruby>");
}

#[test]
fn test_geminiEvent_withErrorPayload_shouldReturnApiError() {
    let result = Gemini::parse_event_line(r#"data: {"error": {"code": 429, "message": "Resource exhausted"}}"#);
    assert!(matches!(
        result,
        Some(Err(ProviderError::ApiError { status_code: 429, .. }))
    ));
}

#[test]
fn test_geminiEvent_withNonDataLine_shouldBeSkipped() {
    assert!(Gemini::parse_event_line("").is_none());
    assert!(Gemini::parse_event_line(": keep-alive").is_none());
    assert!(matches!(Gemini::parse_event_line("data: {oops"), Some(Err(ProviderError::ParseError(_)))));
}

#[tokio::test]
async fn test_ollamaStream_shouldConcatenateResponses() {
    let chunks: Vec<&[u8]> = vec![
        b"{\"response\":\"A: \",\"done\":false}\n{\"resp",
        b"onse\":\"hello\",\"done\":false}\n",
        b"{\"response\":\"\",\"done\":true}",
    ];
    let fragments = lines(byte_chunks(chunks))
        .filter_map(|line| async move {
            match line {
                Ok(line) => Ollama::parse_stream_line(&line),
                Err(e) => Some(Err(e)),
            }
        })
        .boxed();

    assert_eq!(collect_text(fragments).await.unwrap(), "A: hello");
}

#[test]
fn test_ollamaLine_withError_shouldReturnApiError() {
    let result = Ollama::parse_stream_line(r#"{"error": "model not found"}"#);
    assert!(matches!(result, Some(Err(ProviderError::ApiError { .. }))));
}

#[test]
fn test_ollamaNew_withInvalidEndpoint_shouldFail() {
    assert!(Ollama::new("not a url", "llama3.1", 10).is_err());
    assert!(Ollama::new("http://localhost:11434", "llama3.1", 10).is_ok());
}

#[test]
fn test_pollyNew_withInvalidEndpoint_shouldFail() {
    let credentials = Credentials {
        access_key_id: "AKID".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
    };
    assert!(Polly::new("polly", "ap-northeast-2", credentials.clone(), 10).is_err());
    assert!(Polly::new("https://polly.ap-northeast-2.amazonaws.com", "ap-northeast-2", credentials, 10).is_ok());
}

#[test]
fn test_pollyBody_shouldUsePascalCaseFields() {
    let request = SpeechRequest {
        text: "<speak>箱</speak>".to_string(),
        text_type: TextType::Ssml,
        language_code: "ja-JP".to_string(),
        engine: "neural".to_string(),
        voice_id: "Takumi".to_string(),
        output_format: OutputFormat::OggVorbis,
    };

    let json = serde_json::to_value(SynthesizeSpeechBody::from(&request)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Engine": "neural",
            "LanguageCode": "ja-JP",
            "OutputFormat": "ogg_vorbis",
            "Text": "<speak>箱</speak>",
            "TextType": "ssml",
            "VoiceId": "Takumi"
        })
    );
}

#[test]
fn test_sign_shouldProduceScopedAuthorization() {
    let input = SigningInput {
        method: "POST",
        host: "polly.ap-northeast-2.amazonaws.com",
        path: "/v1/speech",
        content_type: "application/json",
        body: b"{}",
        region: "ap-northeast-2",
        service: "polly",
    };
    let credentials = Credentials {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
        session_token: Some("token".to_string()),
    };
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

    let signed = sigv4::sign(&input, &credentials, now).unwrap();
    assert_eq!(signed.amz_date, "20240501T123000Z");
    assert_eq!(signed.session_token.as_deref(), Some("token"));
    assert!(signed.authorization.starts_with(
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240501/ap-northeast-2/polly/aws4_request, \
         SignedHeaders=content-type;host;x-amz-date;x-amz-security-token, Signature="
    ));

    let signature = signed.authorization.rsplit('=').next().unwrap();
    assert_eq!(signature.len(), 64);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));

    // Same input, same time, same signature
    assert_eq!(sigv4::sign(&input, &credentials, now).unwrap(), signed);
}

#[test]
fn test_sign_withDifferentBody_shouldChangeSignature() {
    let credentials = Credentials {
        access_key_id: "AKID".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
    };
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let input = |body: &'static [u8]| SigningInput {
        method: "POST",
        host: "localhost",
        path: "/v1/speech",
        content_type: "application/json",
        body,
        region: "us-east-1",
        service: "polly",
    };

    let first = sigv4::sign(&input(b"a"), &credentials, now).unwrap();
    let second = sigv4::sign(&input(b"b"), &credentials, now).unwrap();
    assert_ne!(first.authorization, second.authorization);
}

#[test]
fn test_credentialsDebug_shouldRedactSecrets() {
    let credentials = Credentials {
        access_key_id: "AKID".to_string(),
        secret_access_key: "super-secret".to_string(),
        session_token: Some("session".to_string()),
    };
    let debug = format!("{:?}", credentials);
    assert!(debug.contains("AKID"));
    assert!(!debug.contains("super-secret"));
    assert!(!debug.contains("\"session\""));
}
