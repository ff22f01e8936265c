use std::fmt;
use std::path::Path;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use crate::errors::CaptionError;

// @module: Caption data model and display helpers

// @struct: One timed caption unit in a single language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    // @field: Segment text, opaque to the engine
    pub text: String,

    // @field: Start time in seconds
    pub start: f64,

    // @field: Duration in seconds
    #[serde(default)]
    pub duration: f64,
}

impl CaptionSegment {
    /// Creates a new caption segment
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        CaptionSegment {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End of the segment in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

// @struct: One merged output row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedLine {
    // @field: Start of the primary segment, in seconds
    pub start: f64,

    // @field: Primary-language text
    pub primary_text: String,

    // @field: Matched secondary-language text, if any
    pub secondary_text: Option<String>,
}

impl AlignedLine {
    /// Start time rendered as `m:ss`
    pub fn format_start(&self) -> String {
        format_time(self.start)
    }
}

impl fmt::Display for AlignedLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.format_start())?;
        writeln!(f, "{}", self.primary_text)?;
        if let Some(secondary) = &self.secondary_text {
            writeln!(f, "    {}", secondary)?;
        }
        Ok(())
    }
}

/// Both caption tracks for one video, each side absent when the language is unavailable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionTracks {
    /// Primary-language segments
    pub primary: Option<Vec<CaptionSegment>>,

    /// Secondary-language segments
    pub secondary: Option<Vec<CaptionSegment>>,
}

impl CaptionTracks {
    /// Create tracks from the two optional segment lists
    pub fn new(primary: Option<Vec<CaptionSegment>>, secondary: Option<Vec<CaptionSegment>>) -> Self {
        CaptionTracks { primary, secondary }
    }

    /// True when neither language has any segment
    pub fn is_empty(&self) -> bool {
        self.primary.as_ref().is_none_or(|p| p.is_empty())
            && self.secondary.as_ref().is_none_or(|s| s.is_empty())
    }
}

/// Format seconds as `minutes:seconds`.
///
/// Seconds are zero-padded to two digits, minutes are not, and fractional
/// seconds are truncated. Negative and NaN input render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let mins = total / 60;
    let secs = total % 60;

    format!("{}:{:02}", mins, secs)
}

/// Parse a JSON array of `{text, start, duration}` objects
pub fn parse_segments(json: &str) -> Result<Vec<CaptionSegment>, CaptionError> {
    let segments: Vec<CaptionSegment> = serde_json::from_str(json)
        .map_err(|e| CaptionError::InvalidSegments(e.to_string()))?;

    if let Some(bad) = segments.iter().find(|s| !s.start.is_finite()) {
        return Err(CaptionError::InvalidSegments(
            format!("non-finite start time for segment {:?}", bad.text)
        ));
    }

    Ok(segments)
}

/// Read a segment list from a JSON file
pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<CaptionSegment>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read caption file: {}", path.display()))?;

    let segments = parse_segments(&content)
        .with_context(|| format!("Failed to parse caption file: {}", path.display()))?;

    Ok(segments)
}
