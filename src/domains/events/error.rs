//! Event-search error types.

use thiserror::Error;

/// Errors that can occur while querying the Ticketmaster Discovery API.
#[derive(Debug, Error)]
pub enum EventsApiError {
    /// No API key was configured.
    #[error(
        "Ticketmaster API key is not configured.\n\
         Set it via environment variable: TICKETMASTER_API_KEY\n\
         You can request a key at: https://developer.ticketmaster.com/"
    )]
    MissingApiKey,

    /// A zero timeout would make every request fail immediately.
    #[error("Request timeout must be at least 1 second")]
    InvalidTimeout,

    /// The HTTP client could not be built or the request could not be assembled.
    #[error("Failed to create HTTP request: {0}")]
    Client(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Transport-level failure (DNS, connection refused, TLS, ...).
    #[error("Request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status code.
    #[error("Ticketmaster API returned HTTP {0}")]
    Status(u16),

    /// The body could not be decoded as an event search response.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}
