/*!
 * Mock caption source for testing.
 *
 * This module provides a caption source that simulates different behaviors:
 * - `MockCaptionSource::serving(tracks)` - Always returns the given tracks
 * - `MockCaptionSource::failing()` - Always fails with an error
 * - `MockCaptionSource::slow(tracks, ms)` - Returns the tracks after a delay
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::captions::CaptionTracks;
use crate::errors::ProviderError;
use crate::providers::CaptionSource;

/// Behavior mode for the mock source
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the configured tracks
    Serving,
    /// Always fails with an API error
    Failing { status_code: u16, message: String },
    /// Fails with a connection error
    Unreachable,
    /// Succeeds after a delay (for last-request-wins testing)
    Slow { delay_ms: u64 },
}

/// Mock caption source with scripted responses
#[derive(Debug, Clone)]
pub struct MockCaptionSource {
    /// Behavior mode
    behavior: MockBehavior,
    /// Tracks served when no per-video override exists
    tracks: CaptionTracks,
    /// Per-video tracks
    by_video: HashMap<String, CaptionTracks>,
    /// Per-video delays, overriding the behavior delay
    delays: HashMap<String, u64>,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockCaptionSource {
    /// Create a new mock source with the specified behavior
    pub fn new(behavior: MockBehavior, tracks: CaptionTracks) -> Self {
        Self {
            behavior,
            tracks,
            by_video: HashMap::new(),
            delays: HashMap::new(),
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a source that always returns `tracks`
    pub fn serving(tracks: CaptionTracks) -> Self {
        Self::new(MockBehavior::Serving, tracks)
    }

    /// Create a source that answers like a service with no captions for the video
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing {
            status_code: 404,
            message: "No transcripts available for this video".to_string(),
        }, CaptionTracks::default())
    }

    /// Create a source that cannot be reached
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable, CaptionTracks::default())
    }

    /// Create a source that answers after `delay_ms`
    pub fn slow(tracks: CaptionTracks, delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms }, tracks)
    }

    /// Serve `tracks` for one specific video
    pub fn with_video(mut self, video_id: impl Into<String>, tracks: CaptionTracks) -> Self {
        self.by_video.insert(video_id.into(), tracks);
        self
    }

    /// Delay the answer for one specific video
    pub fn with_delay(mut self, video_id: impl Into<String>, delay_ms: u64) -> Self {
        self.delays.insert(video_id.into(), delay_ms);
        self
    }

    /// Number of fetches made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn tracks_for(&self, video_id: &str) -> CaptionTracks {
        self.by_video.get(video_id)
            .cloned()
            .unwrap_or_else(|| self.tracks.clone())
    }
}

#[async_trait]
impl CaptionSource for MockCaptionSource {
    async fn fetch(&self, video_id: &str) -> Result<CaptionTracks, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        let delay_ms = match (&self.behavior, self.delays.get(video_id)) {
            (_, Some(ms)) => *ms,
            (MockBehavior::Slow { delay_ms }, None) => *delay_ms,
            _ => 0,
        };
        if delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }

        match &self.behavior {
            MockBehavior::Serving | MockBehavior::Slow { .. } => Ok(self.tracks_for(video_id)),
            MockBehavior::Failing { status_code, message } => Err(ProviderError::ApiError {
                status_code: *status_code,
                message: message.clone(),
            }),
            MockBehavior::Unreachable => Err(ProviderError::ConnectionError(
                "Simulated connection refused".to_string()
            )),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Unreachable => Err(ProviderError::ConnectionError(
                "Simulated connection refused".to_string()
            )),
            _ => Ok(()),
        }
    }
}
