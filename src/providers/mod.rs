/*!
 * Caption source implementations.
 *
 * This module contains the clients that retrieve caption tracks for a video:
 * - `caption_service`: HTTP client for the external caption service
 * - `mock`: In-memory source with scripted behavior, for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::captions::CaptionTracks;
use crate::errors::ProviderError;

/// Common trait for everything that can supply caption tracks
///
/// Implementations are keyed by canonical video identifier and return the
/// primary and secondary tracks, either of which may be unavailable.
#[async_trait]
pub trait CaptionSource: Send + Sync + Debug {
    /// Fetch both caption tracks for a video
    ///
    /// # Arguments
    /// * `video_id` - Canonical video identifier
    ///
    /// # Returns
    /// * `Result<CaptionTracks, ProviderError>` - The tracks or an error
    async fn fetch(&self, video_id: &str) -> Result<CaptionTracks, ProviderError>;

    /// Test the connection to the source
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the source is reachable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod caption_service;
pub mod mock;
