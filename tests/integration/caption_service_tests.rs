/*!
 * Integration tests for the caption service client
 *
 * Each test runs a throwaway HTTP server on localhost so no external
 * service is contacted.
 */

use anyhow::Result;
use dualsub::app_config::Config;
use dualsub::errors::ProviderError;
use dualsub::providers::CaptionSource;
use dualsub::providers::caption_service::CaptionService;
use crate::common;

const BOTH_TRACKS: &str = r#"{
    "ja": [{"text": "こんにちは", "start": 0.0, "duration": 1.5}, {"text": "またね", "start": 3.0, "duration": 1.0}],
    "en": [{"text": "Hello", "start": 0.2, "duration": 1.5}]
}"#;

#[tokio::test]
async fn test_fetch_withBothTracks_shouldReturnBoth() -> Result<()> {
    let (endpoint, mut paths) = common::spawn_stub_server(200, BOTH_TRACKS).await?;
    let service = CaptionService::new(&endpoint, "ja", "en", 5)?;

    let tracks = service.fetch("abc123").await?;

    assert_eq!(tracks.primary.as_ref().map(Vec::len), Some(2));
    assert_eq!(tracks.secondary.as_ref().map(Vec::len), Some(1));
    assert_eq!(paths.recv().await.as_deref(), Some("/captions/abc123"));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withSwappedLanguages_shouldFollowConfiguredKeys() -> Result<()> {
    let (endpoint, _paths) = common::spawn_stub_server(200, BOTH_TRACKS).await?;
    let service = CaptionService::new(&endpoint, "en", "ja", 5)?;

    let tracks = service.fetch("abc123").await?;

    assert_eq!(tracks.primary.unwrap()[0].text, "Hello");
    assert_eq!(tracks.secondary.unwrap()[0].text, "こんにちは");
    Ok(())
}

#[tokio::test]
async fn test_fetch_withThreeLetterConfigCodes_shouldFindTracks() -> Result<()> {
    let (endpoint, _paths) = common::spawn_stub_server(200, BOTH_TRACKS).await?;
    let mut config = Config::default();
    config.primary_language = "jpn".to_string();
    config.secondary_language = "eng".to_string();
    let (primary, secondary) = config.caption_language_keys()?;
    let service = CaptionService::new(&endpoint, primary, secondary, 5)?;

    let tracks = service.fetch("abc123").await?;

    assert_eq!(tracks.primary.as_ref().map(Vec::len), Some(2));
    assert_eq!(tracks.secondary.as_ref().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withMissingLanguage_shouldReportAbsent() -> Result<()> {
    let (endpoint, _paths) = common::spawn_stub_server(200, r#"{"ja": null, "en": []}"#).await?;
    let service = CaptionService::new(&endpoint, "ja", "en", 5)?;

    let tracks = service.fetch("abc123").await?;

    assert!(tracks.primary.is_none());
    assert_eq!(tracks.secondary, Some(vec![]));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withNotFound_shouldSurfaceDetail() -> Result<()> {
    let (endpoint, _paths) = common::spawn_stub_server(
        404,
        r#"{"detail": "No JA or EN transcripts available for this video"}"#,
    ).await?;
    let service = CaptionService::new(&endpoint, "ja", "en", 5)?;

    let error = service.fetch("missing").await.unwrap_err();

    match error {
        ProviderError::ApiError { status_code, message } => {
            assert_eq!(status_code, 404);
            assert_eq!(message, "No JA or EN transcripts available for this video");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_fetch_withMalformedBody_shouldReturnParseError() -> Result<()> {
    let (endpoint, _paths) = common::spawn_stub_server(200, "<html>oops</html>").await?;
    let service = CaptionService::new(&endpoint, "ja", "en", 5)?;

    let result = service.fetch("abc123").await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withClosedPort_shouldReturnConnectionError() -> Result<()> {
    // Bind then drop a listener to get a port nobody is listening on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let service = CaptionService::new(&format!("http://{}", addr), "ja", "en", 5)?;
    let result = service.fetch("abc123").await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
    Ok(())
}

#[test]
fn test_new_withInvalidEndpoint_shouldFail() {
    let result = CaptionService::new("not a url", "ja", "en", 5);
    assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
}
