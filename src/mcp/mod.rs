//! Model Context Protocol (MCP) server implementation
//!
//! Exposes ClickUp operations as MCP tools over stdio or Streamable HTTP.
//!
//! # Layout
//!
//! - **registry**: tool descriptors and type-erased handlers, built once
//! - **validate**: JSON schema checks run before any handler
//! - **dispatcher**: enable filter, validation and error mapping
//! - **tools**: one module of handlers per resource family
//! - **server** / **service**: the rmcp `ServerHandler` and its transports

mod dispatcher;
mod envelope;
mod error;
mod registry;
mod server;
mod service;
pub mod tools;
mod validate;

#[cfg(test)]
mod registry_test;

pub use dispatcher::Dispatcher;
pub use envelope::Envelope;
pub use error::{ToolError, ToolResult, TransportError};
pub use registry::{ToolDescriptor, ToolFamily, ToolFilter, ToolRegistry};
pub use server::McpServer;
pub use service::{create_mcp_service, create_router, serve_http, serve_stdio};
pub use tools::{ToolContext, default_registry, register_all};
