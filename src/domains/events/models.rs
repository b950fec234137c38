//! Ticketmaster Discovery API response models.
//!
//! Only the fields rendered by the formatter are modelled. Every nested field is
//! optional so that a partially populated event still deserializes; missing
//! values surface as `None` instead of a decode failure.

use std::fmt;

use serde::Deserialize;

/// Placeholder rendered for any field the API did not return.
pub const MISSING_FIELD: &str = "N/A";

/// Top-level body of `GET /events.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSearchResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedEvents>,
}

impl EventSearchResponse {
    /// Events in the order returned by the API (empty when the collection is absent).
    pub fn events(&self) -> &[Event] {
        self.embedded
            .as_ref()
            .map(|e| e.events.as_slice())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddedEvents {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single event as listed by the Discovery API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    pub name: Option<String>,
    pub url: Option<String>,
    pub dates: Option<EventDates>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    pub info: Option<String>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EventEmbedded>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDates {
    pub start: Option<EventStart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventStart {
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Classification {
    pub genre: Option<Genre>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genre {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventEmbedded {
    #[serde(default)]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Venue {
    pub name: Option<String>,
}

impl Event {
    pub fn start_date_time(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.start.as_ref())
            .and_then(|s| s.date_time.as_deref())
    }

    /// Distinct genre names across all classifications.
    ///
    /// Duplicates are dropped keeping the first occurrence. The API makes no
    /// ordering promise, so neither do we.
    pub fn genre_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self
            .classifications
            .iter()
            .filter_map(|c| c.genre.as_ref())
            .filter_map(|g| g.name.as_deref())
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Name of the first listed venue.
    pub fn venue_name(&self) -> Option<&str> {
        self.embedded
            .as_ref()
            .and_then(|e| e.venues.first())
            .and_then(|v| v.name.as_deref())
    }
}

/// Flattened view of an [`Event`], rendered as one text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub name: Option<String>,
    pub url: Option<String>,
    pub start_date_time: Option<String>,
    pub genres: Vec<String>,
    pub info: Option<String>,
    pub venue: Option<String>,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            url: event.url.clone(),
            start_date_time: event.start_date_time().map(str::to_string),
            genres: event.genre_names().into_iter().map(str::to_string).collect(),
            info: event.info.clone(),
            venue: event.venue_name().map(str::to_string),
        }
    }
}

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING_FIELD)
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let genres = if self.genres.is_empty() {
            MISSING_FIELD.to_string()
        } else {
            self.genres.join(", ")
        };

        writeln!(f, "Name: {}", or_missing(&self.name))?;
        writeln!(f, "Link: {}", or_missing(&self.url))?;
        writeln!(f, "Event Datetime: {}", or_missing(&self.start_date_time))?;
        writeln!(f, "Genres: {}", genres)?;
        writeln!(f, "Info: {}", or_missing(&self.info))?;
        write!(f, "Venue: {}", or_missing(&self.venue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_from(json: serde_json::Value) -> Event {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_genre_names_deduplicated() {
        let event = event_from(serde_json::json!({
            "classifications": [
                {"genre": {"name": "Rock"}},
                {"genre": {"name": "Pop"}},
                {"genre": {"name": "Rock"}},
                {"segment": {"name": "Music"}}
            ]
        }));

        let mut genres = event.genre_names();
        genres.sort_unstable();
        assert_eq!(genres, vec!["Pop", "Rock"]);
    }

    #[test]
    fn test_venue_name_uses_first_venue() {
        let event = event_from(serde_json::json!({
            "_embedded": {"venues": [{"name": "Blue Note"}, {"name": "Village Vanguard"}]}
        }));
        assert_eq!(event.venue_name(), Some("Blue Note"));
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let summary = EventSummary::from(&Event::default());
        let text = summary.to_string();

        assert!(text.contains("Name: N/A"));
        assert!(text.contains("Genres: N/A"));
        assert!(text.contains("Info: N/A"));
        assert!(text.contains("Venue: N/A"));
    }

    #[test]
    fn test_response_without_embedded_is_empty() {
        let response: EventSearchResponse =
            serde_json::from_str(r#"{"page": {"totalElements": 0}}"#).unwrap();
        assert!(response.is_empty());
        assert!(response.events().is_empty());
    }
}
