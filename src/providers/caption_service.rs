use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;
use log::{debug, error};

use crate::captions::{CaptionSegment, CaptionTracks};
use crate::errors::ProviderError;
use crate::providers::CaptionSource;

/// Client for the caption service
///
/// The service answers `GET {endpoint}/captions/{video_id}` with an object
/// keyed by language code, each value a segment list or `null`.
#[derive(Debug)]
pub struct CaptionService {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the service
    endpoint: Url,
    /// Language key of the primary track
    primary_language: String,
    /// Language key of the secondary track
    secondary_language: String,
}

impl CaptionService {
    /// Create a new caption service client
    pub fn new(
        endpoint: &str,
        primary_language: impl Into<String>,
        secondary_language: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            primary_language: primary_language.into(),
            secondary_language: secondary_language.into(),
        })
    }

    /// URL of the captions resource for a video
    pub fn captions_url(&self, video_id: &str) -> Result<Url, ProviderError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::RequestFailed(format!("Endpoint cannot be a base URL: {}", self.endpoint)))?
            .pop_if_empty()
            .push("captions")
            .push(video_id);
        Ok(url)
    }

    /// Pick the two configured language tracks out of a service response body
    pub fn parse_tracks(&self, body: &str) -> Result<CaptionTracks, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let primary = Self::track(&value, &self.primary_language)?;
        let secondary = Self::track(&value, &self.secondary_language)?;

        Ok(CaptionTracks::new(primary, secondary))
    }

    fn track(value: &Value, language: &str) -> Result<Option<Vec<CaptionSegment>>, ProviderError> {
        match value.get(language) {
            None | Some(Value::Null) => Ok(None),
            Some(track) => serde_json::from_value(track.clone())
                .map(Some)
                .map_err(|e| ProviderError::ParseError(format!("track '{}': {}", language, e))),
        }
    }

    /// Extract the human-readable message from an error body
    fn error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                ["detail", "error"].iter()
                    .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl CaptionSource for CaptionService {
    async fn fetch(&self, video_id: &str) -> Result<CaptionTracks, ProviderError> {
        let url = self.captions_url(video_id)?;
        debug!("Fetching captions from {}", url);

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("Caption service error ({}): {}", status, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        self.parse_tracks(&body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;
        Ok(())
    }
}
