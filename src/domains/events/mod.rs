//! Events domain module.
//!
//! Everything needed to look up live events on the Ticketmaster Discovery API
//! and turn the result into text:
//!
//! - `client.rs` - `TicketmasterClient` and `EventQuery` (the outbound request)
//! - `models.rs` - serde models of the response and the flattened `EventSummary`
//! - `format.rs` - text rendering, including the "no events" sentinel
//! - `error.rs` - `EventsApiError`

mod client;
mod error;
mod format;
mod models;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_CLASSIFICATION, DEFAULT_TIMEOUT_SECS, EventQuery, PAGE_SIZE,
    TicketmasterClient,
};
pub use error::EventsApiError;
pub use format::{NO_EVENTS_MESSAGE, format_events};
pub use models::{Event, EventSearchResponse, EventSummary, MISSING_FIELD};
