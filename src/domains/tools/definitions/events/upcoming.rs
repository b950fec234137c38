//! Upcoming live music events tool.
//!
//! Looks up events on the Ticketmaster Discovery API for a date range and
//! returns them as a plain-text list, one block per event.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domains::events::{EventQuery, TicketmasterClient, format_events};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the upcoming events tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpcomingEventsParams {
    /// Start of the search window.
    #[schemars(
        description = "Start date/time in ISO 8601 format (YYYY-MM-DDTHH:MM:SSZ). Example: 2025-02-08T00:00:00Z"
    )]
    pub start_dttm_str: String,

    /// End of the search window.
    #[schemars(
        description = "End date/time in ISO 8601 format (YYYY-MM-DDTHH:MM:SSZ). Example: 2025-02-10T00:00:00Z"
    )]
    pub end_dttm_str: String,

    /// Optional free-text filter.
    #[serde(default)]
    #[schemars(description = "Any optional keywords to help filter search results")]
    pub keyword: Option<String>,
}

impl From<&UpcomingEventsParams> for EventQuery {
    fn from(params: &UpcomingEventsParams) -> Self {
        EventQuery::new(&params.start_dttm_str, &params.end_dttm_str)
            .with_keyword(params.keyword.clone())
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Upcoming music events tool.
#[derive(Debug, Clone)]
pub struct UpcomingEventsTool;

impl UpcomingEventsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_upcoming_events";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get upcoming music events from Ticketmaster between two ISO 8601 \
         date/times, optionally filtered by keyword. Returns one block per event with its name, link, \
         start date/time, genres, info and venue, or 'No events found!' when nothing matches.";

    /// Execute the tool logic. Blocking: performs the HTTP request inline.
    ///
    /// A failed lookup is logged and reported to the client the same way as an
    /// empty result.
    #[instrument(skip_all, fields(start = %params.start_dttm_str, end = %params.end_dttm_str))]
    pub fn execute(params: &UpcomingEventsParams, client: &TicketmasterClient) -> CallToolResult {
        info!("Searching upcoming events");

        let query = EventQuery::from(params);
        let response = match client.fetch_events(&query) {
            Ok(response) => {
                info!("Found {} event(s)", response.events().len());
                Some(response)
            }
            Err(e) => {
                warn!("Event lookup failed: {}", e);
                None
            }
        };

        CallToolResult::success(vec![Content::text(format_events(response.as_ref()))])
    }

    /// Run [`Self::execute`] on a blocking thread.
    pub async fn run(
        params: UpcomingEventsParams,
        client: Arc<TicketmasterClient>,
    ) -> Result<CallToolResult, McpError> {
        tokio::task::spawn_blocking(move || Self::execute(&params, &client))
            .await
            .map_err(|e| McpError::internal_error(format!("Task execution failed: {}", e), None))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        client: Arc<TicketmasterClient>,
    ) -> Result<serde_json::Value, String> {
        let params: UpcomingEventsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid parameters: {}", e))?;

        let result = Self::execute(&params, &client);

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpcomingEventsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: Arc<TicketmasterClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: UpcomingEventsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Self::run(params, client).await
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
