//! Tool invocation errors and their protocol mapping.
//!
//! Every failure a tool call can produce is one `ToolError` variant. The
//! conversion into `rmcp::ErrorData` is the single place where variants are
//! mapped onto the three protocol error classes.

use miette::Diagnostic;
use rmcp::{ErrorData as McpError, model::ErrorCode};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::clickup::ClickUpError;

#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    #[diagnostic(code(clickup_mcp::mcp::unknown_tool))]
    UnknownTool { name: String },

    #[error("Tool '{name}' is disabled")]
    #[diagnostic(
        code(clickup_mcp::mcp::disabled),
        help("Remove it from DISABLED_TOOLS, or set DOCUMENT_SUPPORT=true for document tools")
    )]
    Disabled { name: String },

    #[error("Invalid parameters: {message}")]
    #[diagnostic(code(clickup_mcp::mcp::invalid_params))]
    InvalidParams { tool: String, message: String },

    #[error("{source}")]
    #[diagnostic(code(clickup_mcp::mcp::service))]
    Service {
        tool: String,
        #[source]
        source: ClickUpError,
    },

    #[error("{message}")]
    #[diagnostic(code(clickup_mcp::mcp::execution))]
    Execution { tool: String, message: String },
}

impl ToolError {
    /// Validation failure; the dispatcher fills in the tool name.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        ToolError::InvalidParams {
            tool: String::new(),
            message: message.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        ToolError::Execution {
            tool: String::new(),
            message: message.into(),
        }
    }

    /// Attach the tool name where the error does not carry one yet.
    pub fn with_tool(self, name: &str) -> Self {
        match self {
            ToolError::InvalidParams { tool, message } if tool.is_empty() => {
                ToolError::InvalidParams {
                    tool: name.to_string(),
                    message,
                }
            }
            ToolError::Service { tool, source } if tool.is_empty() => ToolError::Service {
                tool: name.to_string(),
                source,
            },
            ToolError::Execution { tool, message } if tool.is_empty() => ToolError::Execution {
                tool: name.to_string(),
                message,
            },
            other => other,
        }
    }

    pub fn is_invalid_params(&self) -> bool {
        matches!(self, ToolError::InvalidParams { .. })
    }
}

impl From<ClickUpError> for ToolError {
    fn from(source: ClickUpError) -> Self {
        ToolError::Service {
            tool: String::new(),
            source,
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        ToolError::execution(format!("Failed to serialize result: {e}"))
    }
}

fn tool_data(tool: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("tool".to_string(), json!(tool));
    data
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        match err {
            ToolError::UnknownTool { name } | ToolError::Disabled { name } => McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                message,
                Some(Value::Object(tool_data(&name))),
            ),
            ToolError::InvalidParams { tool, .. } => McpError::new(
                ErrorCode::INVALID_PARAMS,
                message,
                Some(Value::Object(tool_data(&tool))),
            ),
            ToolError::Service { tool, source } => {
                let mut data = tool_data(&tool);
                if let ClickUpError::Api { status, code, .. } = &source {
                    data.insert("status".to_string(), json!(status));
                    if let Some(code) = code {
                        data.insert("ecode".to_string(), json!(code));
                    }
                }
                McpError::new(ErrorCode::INTERNAL_ERROR, message, Some(Value::Object(data)))
            }
            ToolError::Execution { tool, .. } => McpError::new(
                ErrorCode::INTERNAL_ERROR,
                message,
                Some(Value::Object(tool_data(&tool))),
            ),
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Failures of the transport layer itself.
#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(clickup_mcp::transport::bind),
        help("Pick a free port with --port or CLICKUP_MCP_PORT")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    #[diagnostic(code(clickup_mcp::transport::io))]
    Io(#[from] std::io::Error),

    #[error("MCP session failed to initialize: {message}")]
    #[diagnostic(code(clickup_mcp::transport::initialize))]
    Initialize { message: String },

    #[error("MCP session ended abnormally: {message}")]
    #[diagnostic(code(clickup_mcp::transport::session))]
    Session { message: String },
}
