/*!
 * # dualsub - dual-language subtitles for online videos
 *
 * A Rust library for showing two caption tracks of a video, a primary
 * language and an optional secondary language, as one merged timeline.
 *
 * ## Features
 *
 * - Resolve video IDs from raw IDs, watch URLs, short links and embed URLs
 * - Fetch both caption tracks from a caption service
 * - Align the tracks by nearest start time within a 2 second window
 * - Render the merged timeline with `m:ss` timestamps
 * - Last-request-wins handling of rapid re-submissions
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: Nearest-neighbour merge of the two tracks
 * - `captions`: Caption segments, aligned lines and time formatting
 * - `video_ref`: Video reference resolution
 * - `providers`: Caption sources:
 *   - `providers::caption_service`: HTTP caption service client
 *   - `providers::mock`: Scripted source for tests
 * - `request_guard`: Request sequencing
 * - `player`: Embedded player lifecycle
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod captions;
pub mod errors;
pub mod language_utils;
pub mod player;
pub mod providers;
pub mod request_guard;
pub mod video_ref;

// Re-export main types for easier usage
pub use alignment::{align, MATCH_TOLERANCE_SECS};
pub use app_config::Config;
pub use app_controller::{Controller, SubtitleView};
pub use captions::{AlignedLine, CaptionSegment, CaptionTracks, format_time};
pub use video_ref::resolve_id;
pub use errors::{AppError, CaptionError, ProviderError};
