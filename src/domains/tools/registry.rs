//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::UpcomingEventsTool;
use crate::domains::events::TicketmasterClient;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: Arc<TicketmasterClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<TicketmasterClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![UpcomingEventsTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![UpcomingEventsTool::to_tool()]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Handlers block on network I/O; call this from a blocking thread.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            UpcomingEventsTool::NAME => {
                UpcomingEventsTool::http_handler(arguments, self.client.clone())
                    .map_err(ToolError::invalid_arguments)
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TicketmasterConfig;

    fn test_client() -> Arc<TicketmasterClient> {
        let config = TicketmasterConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        Arc::new(TicketmasterClient::new(&config).unwrap())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_client());
        assert_eq!(registry.tool_names(), vec!["get_upcoming_events"]);
        assert_eq!(ToolRegistry::get_all_tools().len(), 1);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unreachable_api() {
        let registry = ToolRegistry::new(test_client());
        let result = registry
            .call_tool(
                "get_upcoming_events",
                serde_json::json!({
                    "start_dttm_str": "2025-02-08T00:00:00Z",
                    "end_dttm_str": "2025-02-10T00:00:00Z"
                }),
            )
            .unwrap();
        assert_eq!(result["content"][0]["text"], "No events found!");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("unknown", serde_json::json!({}));
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
