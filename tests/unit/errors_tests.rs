/*!
 * Tests for the error types
 */

use reibun::errors::{AppError, GenerationError, ProviderError};

#[test]
fn test_providerError_display_shouldIncludeDetails() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "quota exceeded".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 429 - quota exceeded");

    let error = ProviderError::ConnectionError("timed out".to_string());
    assert_eq!(error.to_string(), "Connection error: timed out");
}

#[test]
fn test_generationError_fromProviderError_shouldWrap() {
    let error: GenerationError = ProviderError::AuthenticationError("bad signature".to_string()).into();
    assert!(matches!(error, GenerationError::Provider(ProviderError::AuthenticationError(_))));
    assert!(error.to_string().contains("bad signature"));
}

#[test]
fn test_missingLines_display_shouldNameCounts() {
    let error = GenerationError::MissingLines { expected: 8, found: 5 };
    assert_eq!(error.to_string(), "Expected 8 non-blank lines from the generator, found 5");
}

#[test]
fn test_appError_conversions_shouldPickVariant() {
    let error: AppError = GenerationError::NoCandidates.into();
    assert!(matches!(error, AppError::Generation(GenerationError::NoCandidates)));

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(error, AppError::File(_)));

    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "boom"));
}

#[test]
fn test_generationError_intoAnyhow_shouldKeepSource() {
    let error = anyhow::Error::from(GenerationError::MissingLines { expected: 8, found: 0 });
    assert!(matches!(
        error.downcast_ref::<GenerationError>(),
        Some(GenerationError::MissingLines { found: 0, .. })
    ));
}
