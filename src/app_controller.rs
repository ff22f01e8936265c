use std::fmt::Write;
use std::sync::Arc;
use std::time::Instant;
use log::{debug, info, warn};
use serde::Serialize;

use crate::alignment::{self, AlignmentSummary};
use crate::app_config::Config;
use crate::captions::AlignedLine;
use crate::errors::{AppError, CaptionError};
use crate::providers::CaptionSource;
use crate::request_guard::{RequestSequencer, RequestToken};
use crate::video_ref;

// @module: Application controller for loading dual-language subtitles

/// Merged subtitles for one video
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleView {
    /// Canonical video identifier
    pub video_id: String,
    /// Merged timeline
    pub lines: Vec<AlignedLine>,
    /// Match statistics
    #[serde(skip)]
    pub summary: AlignmentSummary,
}

/// Main application controller: resolve, fetch, align, render
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Where caption tracks come from
    source: Arc<dyn CaptionSource>,
    // @field: Last-request-wins bookkeeping
    sequencer: RequestSequencer,
}

impl Controller {
    // @method: Create a new controller with the given configuration and caption source
    pub fn with_config(config: Config, source: Arc<dyn CaptionSource>) -> Self {
        Self {
            config,
            source,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sequencer deciding which request is the latest
    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// Resolve the user input, fetch both caption tracks and merge them
    pub async fn load(&self, input: &str) -> Result<SubtitleView, AppError> {
        let start_time = Instant::now();

        let video_id = video_ref::resolve_id(input)
            .ok_or_else(|| AppError::InvalidReference(input.to_string()))?;
        debug!("Resolved {:?} to video ID {}", input, video_id);

        let tracks = self.source.fetch(&video_id).await?;

        if tracks.secondary.as_ref().is_none_or(|s| s.is_empty()) {
            warn!(
                "No {} subtitles for {}, showing {} only",
                self.config.secondary_language_name(), video_id, self.config.primary_language_name()
            );
        }

        let lines = alignment::align(tracks.primary.as_deref(), tracks.secondary.as_deref());
        if lines.is_empty() {
            return Err(CaptionError::NoPrimaryCaptions(self.config.primary_language_name()).into());
        }

        let summary = AlignmentSummary::from_lines(&lines);
        info!(
            "Loaded {} lines for {} ({} with {}) in {:.2?}",
            summary.total, video_id, summary.matched,
            self.config.secondary_language_name(), start_time.elapsed()
        );

        Ok(SubtitleView { video_id, lines, summary })
    }

    /// Run [`Controller::load`] for the request identified by `token`.
    ///
    /// Take the token from [`Controller::sequencer`] when the request is
    /// issued, before any await point. Returns `Ok(None)` when a newer token
    /// was issued while this request was in flight; its outcome, success or
    /// failure, is discarded.
    pub async fn load_latest(&self, token: RequestToken, input: &str) -> Result<Option<SubtitleView>, AppError> {
        let result = self.load(input).await;

        match self.sequencer.accept(token, result) {
            Some(result) => result.map(Some),
            None => Ok(None),
        }
    }

    /// Render merged lines as plain text
    pub fn render(&self, view: &SubtitleView) -> String {
        render_view(&self.config, view)
    }
}

/// Render merged lines as plain text using the display settings of `config`
pub fn render_view(config: &Config, view: &SubtitleView) -> String {
    let mut out = String::new();

    for line in &view.lines {
        if config.display.show_timestamps {
            let _ = writeln!(out, "{}", line.format_start());
        }
        let _ = writeln!(out, "{}", line.primary_text);
        if let Some(secondary) = &line.secondary_text {
            let _ = writeln!(out, "    {}", secondary);
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "{} lines, {} with {} subtitles",
        view.summary.total, view.summary.matched, config.secondary_language_name()
    );

    out
}
