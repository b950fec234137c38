//! Ticketmaster Discovery API client.
//!
//! The client is a small immutable value: it holds the API key, base URL and
//! timeout, and builds a fresh blocking HTTP client per call. It can be shared
//! across concurrent tool invocations behind an `Arc`.

use std::time::Duration;

use reqwest::blocking::{Client, Request};
use tracing::{debug, instrument, warn};

use super::error::EventsApiError;
use super::models::EventSearchResponse;
use crate::core::config::TicketmasterConfig;

pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CLASSIFICATION: &str = "Music";

/// Fixed page size; only the first page is ever requested.
pub const PAGE_SIZE: u32 = 100;

const EVENTS_PATH: &str = "/events.json";

/// Search parameters for a single events query.
///
/// Timestamps are forwarded verbatim; the API is the one to reject malformed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub start_date_time: String,
    pub end_date_time: String,
    pub classification_name: String,
    pub keyword: Option<String>,
}

impl EventQuery {
    /// Create a query for music events between two ISO-8601 timestamps.
    pub fn new(start_date_time: impl Into<String>, end_date_time: impl Into<String>) -> Self {
        Self {
            start_date_time: start_date_time.into(),
            end_date_time: end_date_time.into(),
            classification_name: DEFAULT_CLASSIFICATION.to_string(),
            keyword: None,
        }
    }

    pub fn with_classification(mut self, classification_name: impl Into<String>) -> Self {
        self.classification_name = classification_name.into();
        self
    }

    /// Set the optional keyword. Empty strings are treated as no keyword.
    pub fn with_keyword(mut self, keyword: Option<String>) -> Self {
        self.keyword = keyword.filter(|k| !k.is_empty());
        self
    }

    /// Query-string pairs sent to the API, excluding the API key.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("startDateTime", self.start_date_time.clone()),
            ("endDateTime", self.end_date_time.clone()),
            ("classificationName", self.classification_name.clone()),
            ("size", PAGE_SIZE.to_string()),
        ];
        if let Some(keyword) = &self.keyword {
            params.push(("keyword", keyword.clone()));
        }
        params
    }
}

/// Client for the Discovery API `events` endpoint.
#[derive(Clone)]
pub struct TicketmasterClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for TicketmasterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketmasterClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TicketmasterClient {
    /// Create a client from configuration.
    ///
    /// Fails with [`EventsApiError::MissingApiKey`] when no non-blank key is configured
    /// and with [`EventsApiError::InvalidTimeout`] when `timeout_secs` is zero.
    pub fn new(config: &TicketmasterConfig) -> Result<Self, EventsApiError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(EventsApiError::MissingApiKey)?;

        if config.timeout_secs == 0 {
            return Err(EventsApiError::InvalidTimeout);
        }

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn http_client(&self) -> Result<Client, EventsApiError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EventsApiError::Client(e.to_string()))
    }

    fn build_request_with(
        &self,
        client: &Client,
        query: &EventQuery,
    ) -> Result<Request, EventsApiError> {
        let mut params = vec![("apikey", self.api_key.clone())];
        params.extend(query.params());

        client
            .get(format!("{}{}", self.base_url, EVENTS_PATH))
            .query(&params)
            .build()
            .map_err(|e| EventsApiError::Client(e.to_string()))
    }

    /// Build the outbound request without sending it.
    pub fn build_request(&self, query: &EventQuery) -> Result<Request, EventsApiError> {
        let client = self.http_client()?;
        self.build_request_with(&client, query)
    }

    /// Fetch events matching `query`.
    ///
    /// This is a blocking call; run it on a blocking thread from async code.
    #[instrument(skip(self), fields(start = %query.start_date_time, end = %query.end_date_time))]
    pub fn fetch_events(&self, query: &EventQuery) -> Result<EventSearchResponse, EventsApiError> {
        let client = self.http_client()?;
        let request = self.build_request_with(&client, query)?;

        let response = client.execute(request).map_err(|e| {
            if e.is_timeout() {
                EventsApiError::Timeout(self.timeout.as_secs())
            } else {
                EventsApiError::Request(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Ticketmaster API returned status {}", status);
            return Err(EventsApiError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| EventsApiError::InvalidResponse(e.without_url().to_string()))?;

        debug!("API response received: {} bytes", body.len());

        serde_json::from_slice(&body)
            .map_err(|e| EventsApiError::InvalidResponse(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const JAZZ_NIGHT: &str = r#"{
        "_embedded": {
            "events": [{
                "name": "Jazz Night",
                "url": "http://x",
                "dates": {"start": {"dateTime": "2025-02-08T20:00:00Z"}},
                "classifications": [{"genre": {"name": "Jazz"}}],
                "info": "18+",
                "_embedded": {"venues": [{"name": "Blue Note"}]}
            }]
        }
    }"#;

    fn test_config(base_url: &str) -> TicketmasterConfig {
        TicketmasterConfig {
            api_key: Some("test-key".to_string()),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    fn query_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_new_requires_api_key() {
        let mut config = test_config(DEFAULT_BASE_URL);
        config.api_key = None;
        assert!(matches!(
            TicketmasterClient::new(&config),
            Err(EventsApiError::MissingApiKey)
        ));

        config.api_key = Some("   ".to_string());
        assert!(matches!(
            TicketmasterClient::new(&config),
            Err(EventsApiError::MissingApiKey)
        ));
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let mut config = test_config(DEFAULT_BASE_URL);
        config.timeout_secs = 0;
        assert!(matches!(
            TicketmasterClient::new(&config),
            Err(EventsApiError::InvalidTimeout)
        ));

        config.timeout_secs = 1;
        let client = TicketmasterClient::new(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = TicketmasterClient::new(&test_config(DEFAULT_BASE_URL)).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("test-key"));
    }

    #[test]
    fn test_request_parameters() {
        let client = TicketmasterClient::new(&test_config(DEFAULT_BASE_URL)).unwrap();
        let query = EventQuery::new("2025-02-08T00:00:00Z", "2025-02-10T00:00:00Z")
            .with_keyword(Some("jazz".to_string()));

        let request = client.build_request(&query).unwrap();
        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.url().as_str().split('?').next(),
            Some("https://app.ticketmaster.com/discovery/v2/events.json")
        );

        let pairs = query_pairs(&request);
        let expected = [
            ("apikey", "test-key"),
            ("startDateTime", "2025-02-08T00:00:00Z"),
            ("endDateTime", "2025-02-10T00:00:00Z"),
            ("classificationName", "Music"),
            ("size", "100"),
            ("keyword", "jazz"),
        ];
        for (key, value) in expected {
            assert!(
                pairs.iter().any(|(k, v)| k == key && v == value),
                "missing {key}={value} in {pairs:?}"
            );
        }
    }

    #[test]
    fn test_keyword_omitted_when_absent_or_empty() {
        let client = TicketmasterClient::new(&test_config(DEFAULT_BASE_URL)).unwrap();

        for keyword in [None, Some(String::new())] {
            let query = EventQuery::new("2025-02-08T00:00:00Z", "2025-02-10T00:00:00Z")
                .with_keyword(keyword);
            let request = client.build_request(&query).unwrap();
            assert!(!query_pairs(&request).iter().any(|(k, _)| k == "keyword"));
        }
    }

    #[test]
    fn test_classification_override() {
        let client = TicketmasterClient::new(&test_config(DEFAULT_BASE_URL)).unwrap();
        let query = EventQuery::new("a", "b").with_classification("Sports");

        let pairs = query_pairs(&client.build_request(&query).unwrap());
        assert!(pairs.contains(&("classificationName".to_string(), "Sports".to_string())));
        assert!(!pairs.iter().any(|(_, v)| v == "Music"));
    }

    #[test]
    fn test_fetch_events_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/events.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
                Matcher::UrlEncoded("startDateTime".into(), "2025-02-08T00:00:00Z".into()),
                Matcher::UrlEncoded("endDateTime".into(), "2025-02-10T00:00:00Z".into()),
                Matcher::UrlEncoded("classificationName".into(), "Music".into()),
                Matcher::UrlEncoded("size".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(JAZZ_NIGHT)
            .create();

        let client = TicketmasterClient::new(&test_config(&server.url())).unwrap();
        let query = EventQuery::new("2025-02-08T00:00:00Z", "2025-02-10T00:00:00Z");
        let response = client.fetch_events(&query).unwrap();

        mock.assert();
        assert_eq!(response.events().len(), 1);
        assert_eq!(response.events()[0].name.as_deref(), Some("Jazz Night"));
    }

    #[test]
    fn test_fetch_events_http_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/events.json")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"fault": {"faultstring": "Invalid ApiKey"}}"#)
            .create();

        let client = TicketmasterClient::new(&test_config(&server.url())).unwrap();
        let result = client.fetch_events(&EventQuery::new("a", "b"));
        assert!(matches!(result, Err(EventsApiError::Status(401))));
    }

    #[test]
    fn test_fetch_events_malformed_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/events.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();

        let client = TicketmasterClient::new(&test_config(&server.url())).unwrap();
        let result = client.fetch_events(&EventQuery::new("a", "b"));
        assert!(matches!(result, Err(EventsApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_fetch_events_network_error() {
        // Nothing listens on port 1.
        let client = TicketmasterClient::new(&test_config("http://127.0.0.1:1")).unwrap();
        let result = client.fetch_events(&EventQuery::new("a", "b"));
        assert!(matches!(
            result,
            Err(EventsApiError::Request(_)) | Err(EventsApiError::Timeout(_))
        ));
    }

    #[test]
    fn test_fetch_events_timeout() {
        // Bound but never accepted: the connection completes via the backlog and no reply ever comes.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let mut config = test_config(&base_url);
        config.timeout_secs = 1;
        let client = TicketmasterClient::new(&config).unwrap();

        let result = client.fetch_events(&EventQuery::new("a", "b"));
        assert!(
            matches!(result, Err(EventsApiError::Timeout(1))),
            "expected timeout, got {result:?}"
        );
        drop(listener);
    }
}
