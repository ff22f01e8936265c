/*!
 * Dual-track caption alignment.
 *
 * Pairs every primary-language segment with the secondary-language segment
 * whose start time is nearest to its own, as long as the two are no more than
 * [`MATCH_TOLERANCE_SECS`] apart. Matching is independent per primary
 * segment: a secondary segment can be attached to several primary lines and
 * nothing is consumed.
 */

use log::debug;
use crate::captions::{AlignedLine, CaptionSegment};

/// Maximum start-time distance, in seconds, for a secondary segment to match
pub const MATCH_TOLERANCE_SECS: f64 = 2.0;

/// Merge two caption tracks into one timeline anchored on the primary track.
///
/// Returns one line per primary segment, in primary order. An absent or
/// empty primary track yields no lines; an absent or empty secondary track
/// yields primary-only lines without searching.
pub fn align(primary: Option<&[CaptionSegment]>, secondary: Option<&[CaptionSegment]>) -> Vec<AlignedLine> {
    let primary = match primary {
        Some(p) if !p.is_empty() => p,
        _ => return Vec::new(),
    };

    let secondary = match secondary {
        Some(s) if !s.is_empty() => s,
        _ => {
            return primary.iter()
                .map(|p| AlignedLine {
                    start: p.start,
                    primary_text: p.text.clone(),
                    secondary_text: None,
                })
                .collect();
        }
    };

    let lines: Vec<AlignedLine> = primary.iter()
        .map(|p| {
            let secondary_text = nearest_match(p.start, secondary)
                .filter(|(_, delta)| *delta <= MATCH_TOLERANCE_SECS)
                .map(|(s, _)| s.text.clone());

            AlignedLine {
                start: p.start,
                primary_text: p.text.clone(),
                secondary_text,
            }
        })
        .collect();

    debug!(
        "Aligned {} primary against {} secondary segments",
        primary.len(), secondary.len()
    );

    lines
}

/// Find the secondary segment whose start is closest to `start`.
///
/// Returns the segment and its distance. Earlier segments win exact ties.
/// Segments with a NaN start never win.
pub fn nearest_match(start: f64, secondary: &[CaptionSegment]) -> Option<(&CaptionSegment, f64)> {
    let mut best: Option<&CaptionSegment> = None;
    let mut best_delta = f64::INFINITY;

    for candidate in secondary {
        let delta = (candidate.start - start).abs();
        if delta < best_delta {
            best_delta = delta;
            best = Some(candidate);
        }
    }

    best.map(|s| (s, best_delta))
}

/// Match statistics for a merged timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignmentSummary {
    /// Number of lines
    pub total: usize,
    /// Lines with a secondary text attached
    pub matched: usize,
}

impl AlignmentSummary {
    pub fn from_lines(lines: &[AlignedLine]) -> Self {
        Self {
            total: lines.len(),
            matched: lines.iter().filter(|l| l.secondary_text.is_some()).count(),
        }
    }

    /// Lines left without a secondary text
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }
}
