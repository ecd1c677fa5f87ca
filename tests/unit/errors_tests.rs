/*!
 * Tests for error types and conversions
 */

use tubetrans::errors::{AppError, ProviderError, TranscriptError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_timeout_shouldDisplayCorrectly() {
    let error = ProviderError::Timeout("after 60s".to_string());
    assert!(error.to_string().contains("timed out"));
}

#[test]
fn test_transcriptError_shouldNameVideo() {
    let error = TranscriptError::TranscriptsDisabled("dQw4w9WgXcQ".to_string());
    assert!(error.to_string().contains("dQw4w9WgXcQ"));
}

#[test]
fn test_appError_fromTranscriptError_shouldBeNotFound() {
    let error: AppError = TranscriptError::NoTranscriptFound("abc".to_string()).into();
    assert!(error.is_not_found());
    assert!(!error.is_client_error());
}

#[test]
fn test_appError_invalidInput_shouldBeClientError() {
    let error = AppError::InvalidInput("Invalid YouTube URL".to_string());
    assert!(error.is_client_error());
    assert!(!error.is_not_found());
    assert!(error.to_string().contains("Invalid YouTube URL"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref m) if m == "boom"));
}
