//! Tool discovery and invocation.
//!
//! The dispatcher is transport-agnostic: stdio and HTTP sessions all share
//! one instance.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject, Tool},
};
use tracing::{info, warn};

use super::envelope::Envelope;
use super::error::{ToolError, ToolResult};
use super::registry::{ToolFilter, ToolRegistry};
use super::tools::ToolContext;
use super::validate::validate;

pub struct Dispatcher {
    registry: ToolRegistry,
    filter: ToolFilter,
    context: ToolContext,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, filter: ToolFilter, context: ToolContext) -> Self {
        Self {
            registry,
            filter,
            context,
        }
    }

    /// Enabled tools, sorted by name.
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut descriptors: Vec<_> = self
            .registry
            .descriptors()
            .filter(|d| self.filter.is_enabled(d))
            .collect();
        descriptors.sort_by_key(|d| d.name);
        descriptors.into_iter().map(|d| d.to_tool()).collect()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .is_some_and(|entry| self.filter.is_enabled(&entry.descriptor))
    }

    /// Run one tool call and return its envelope.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> ToolResult<Envelope> {
        let arguments = arguments.unwrap_or_default();
        info!(tool = name, arguments = %serde_json::Value::Object(arguments.clone()), "tool call");

        let result = self.run(name, arguments.clone()).await;
        if let Err(e) = &result {
            warn!(
                tool = name,
                arguments = %serde_json::Value::Object(arguments),
                error = %e,
                "tool call failed"
            );
        }
        result
    }

    async fn run(&self, name: &str, arguments: JsonObject) -> ToolResult<Envelope> {
        if self.filter.is_disabled_name(name) {
            return Err(ToolError::Disabled {
                name: name.to_string(),
            });
        }
        let entry = self.registry.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
        })?;
        if !self.filter.is_enabled(&entry.descriptor) {
            return Err(ToolError::Disabled {
                name: name.to_string(),
            });
        }

        validate(&entry.descriptor.input_schema, &arguments)
            .map_err(ToolError::invalid_params)
            .map_err(|e| e.with_tool(name))?;

        entry
            .call(&self.context, arguments)
            .await
            .map_err(|e| e.with_tool(name))
    }

    /// Protocol-level call: envelope on success, `ErrorData` otherwise.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke(name, arguments)
            .await
            .map(Envelope::into_call_result)
            .map_err(McpError::from)
    }
}
