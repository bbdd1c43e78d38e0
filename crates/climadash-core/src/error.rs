//! Error types for climadash-core.
//!
//! This module defines the errors that can occur when talking to the readings
//! API and when driving dashboard state.
//!
//! # Error Classification
//!
//! | Error Type | Origin | User-facing behavior |
//! |------------|--------|----------------------|
//! | [`Error::NotReachable`] | Transport failure (DNS, connect, timeout) | Error view, no retry |
//! | [`Error::Api`] | Non-success HTTP status | Error view, no retry |
//! | [`Error::Decode`] | Body is not the expected envelope | Error view, no retry |
//! | [`Error::InvalidUrl`] | Bad base URL in configuration | Reported at startup |
//! | [`Error::InvalidMonth`] | Month index outside 0-11 | Rejected before any request |
//!
//! An empty result is never an error: it is a valid page with no readings.

use thiserror::Error;

/// Errors that can occur in climadash-core.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The API could not be reached.
    #[error("API not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed after a response started.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected envelope.
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Month index outside 0..=11.
    #[error("Invalid month index {0} (expected 0-11)")]
    InvalidMonth(i64),
}

impl Error {
    /// HTTP status code, if the API answered with one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Request(e) | Error::NotReachable { source: e, .. } => {
                e.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }

    /// Returns true if the error came from the transport rather than the API.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::NotReachable { .. } | Error::Request(_))
    }
}

/// Result type alias using climadash-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
