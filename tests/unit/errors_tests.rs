/*!
 * Tests for error types and conversions
 */

use dualsub::errors::{AppError, CaptionError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 404,
        message: "No JA or EN transcripts available for this video".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("404"));
    assert!(display.contains("No JA or EN transcripts"));
}

#[test]
fn test_providerError_userMessage_shouldPreferServiceDetail() {
    let error = ProviderError::ApiError { status_code: 404, message: "Video unavailable".to_string() };
    assert_eq!(error.user_message(), "Video unavailable");

    let error = ProviderError::ApiError { status_code: 500, message: String::new() };
    assert_eq!(error.user_message(), "Could not load captions for this video.");

    let error = ProviderError::ConnectionError("refused".to_string());
    assert_eq!(error.user_message(), "Could not reach the caption service.");
}

#[test]
fn test_captionError_noPrimaryCaptions_shouldNameLanguage() {
    let error = CaptionError::NoPrimaryCaptions("Japanese".to_string());
    assert_eq!(error.to_string(), "No Japanese subtitles available for this video.");
}

#[test]
fn test_appError_fromProviderError_shouldWrap() {
    let error: AppError = ProviderError::ParseError("bad json".to_string()).into();
    assert!(matches!(error, AppError::Provider(ProviderError::ParseError(_))));
    assert!(error.to_string().contains("bad json"));
}

#[test]
fn test_appError_userMessage_shouldBeUserFacing() {
    let error = AppError::InvalidReference("   ".to_string());
    assert_eq!(error.user_message(), "Could not extract a video ID from your input.");

    let error: AppError = CaptionError::NoPrimaryCaptions("Korean".to_string()).into();
    assert_eq!(error.user_message(), "No Korean subtitles available for this video.");

    let error: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(error.user_message(), "Unexpected error while loading captions.");
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}
