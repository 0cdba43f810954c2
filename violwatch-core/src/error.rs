// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the violation dashboard.
//!
//! Every capability the controller talks to (HTTP, event stream, DOM) reports
//! failures as a [`DashboardError`]. The controller is the only place these are
//! swallowed: the dashboard is a best-effort cosmetic layer, so a failure degrades
//! one panel and never blocks the others.
//!
//! # Examples
//!
//! ```
//! use violwatch_core::{DashboardError, Result};
//!
//! fn fetch_status() -> Result<bool> {
//!     Err(DashboardError::network("/api/detector_status", "connection refused"))
//! }
//!
//! assert!(fetch_status().unwrap_err().is_network());
//! ```

/// Root error type for all dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The request never produced a response (fetch rejection, CORS, offline).
    #[error("Network failure on {endpoint}: {reason}")]
    Network {
        /// Endpoint path that was requested
        endpoint: String,
        /// Platform-provided failure description
        reason: String,
    },

    /// The server answered with a non-success status code.
    #[error("{endpoint} answered with HTTP {status}")]
    HttpStatus {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// Endpoint path (or stream URL) the payload came from
        endpoint: String,
        /// Decoder error message
        reason: String,
    },

    /// Statistics payload whose label and value series disagree in length.
    #[error("Statistics series mismatch: {labels} labels, {values} values")]
    InconsistentStats {
        /// Number of labels received
        labels: usize,
        /// Number of values received
        values: usize,
    },

    /// A DOM element the dashboard needs is not present in the page.
    #[error("Element #{id} not found")]
    MissingElement {
        /// Element id that was looked up
        id: String,
    },

    /// A DOM call threw, e.g. element creation or a canvas context lookup.
    #[error("DOM operation failed: {reason}")]
    Dom {
        /// Exception message
        reason: String,
    },

    /// The server-push connection failed or ended.
    #[error("Event stream closed: {reason}")]
    StreamClosed {
        /// Why the connection stopped delivering messages
        reason: String,
    },

    /// The dashboard configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl DashboardError {
    /// Create a network error for the given endpoint
    pub fn network(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an HTTP status error for the given endpoint
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a malformed response error for the given endpoint
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing element error
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create a DOM error
    pub fn dom(reason: impl Into<String>) -> Self {
        Self::Dom {
            reason: reason.into(),
        }
    }

    /// Create a stream closed error
    pub fn stream_closed(reason: impl Into<String>) -> Self {
        Self::StreamClosed {
            reason: reason.into(),
        }
    }

    /// True for failures that happened before a usable response arrived.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpStatus { .. })
    }

    /// True for responses that arrived but could not be understood.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse { .. } | Self::InconsistentStats { .. }
        )
    }
}

/// Specialized Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait for attaching an endpoint to decoder errors
pub trait DecodeResultExt<T> {
    /// Convert a decoding error into [`DashboardError::MalformedResponse`]
    fn malformed_at(self, endpoint: &str) -> Result<T>;
}

impl<T> DecodeResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn malformed_at(self, endpoint: &str) -> Result<T> {
        self.map_err(|e| DashboardError::malformed(endpoint, e.to_string()))
    }
}
