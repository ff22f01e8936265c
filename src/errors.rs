/*!
 * Error types for the dualsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the caption service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ProviderError {
    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } if !message.is_empty() => message.clone(),
            Self::ConnectionError(_) => "Could not reach the caption service.".to_string(),
            _ => "Could not load captions for this video.".to_string(),
        }
    }
}

/// Errors that can occur while handling caption data
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The primary track is absent or empty, so there is nothing to anchor on
    #[error("No {0} subtitles available for this video.")]
    NoPrimaryCaptions(String),

    /// A segment list could not be read
    #[error("Invalid caption segments: {0}")]
    InvalidSegments(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The user input did not yield a video identifier
    #[error("Could not extract a video ID from your input: {0:?}")]
    InvalidReference(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the caption service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from caption handling
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Message shown to the user in place of the full error chain
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidReference(_) => "Could not extract a video ID from your input.".to_string(),
            Self::Provider(e) => e.user_message(),
            Self::Caption(e) => e.to_string(),
            _ => "Unexpected error while loading captions.".to_string(),
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
