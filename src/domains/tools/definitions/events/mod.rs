//! Live events tools module.
//!
//! - `upcoming`: upcoming music events in a date range (Ticketmaster Discovery API)

pub mod upcoming;

pub use upcoming::{UpcomingEventsParams, UpcomingEventsTool};
