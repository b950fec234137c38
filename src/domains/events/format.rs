//! Plain-text rendering of event search results.

use super::models::{EventSearchResponse, EventSummary};

/// Returned when there is nothing to show, including after a failed fetch.
pub const NO_EVENTS_MESSAGE: &str = "No events found!";

/// Render a search response as one text block per event.
///
/// Blocks keep the API's ordering and are separated by a single blank line.
/// `None` and an empty events collection both yield [`NO_EVENTS_MESSAGE`].
pub fn format_events(response: Option<&EventSearchResponse>) -> String {
    let Some(response) = response.filter(|r| !r.is_empty()) else {
        return NO_EVENTS_MESSAGE.to_string();
    };

    response
        .events()
        .iter()
        .map(|event| EventSummary::from(event).to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
