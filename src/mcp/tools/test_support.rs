//! Shared fixtures for tool tests.

use std::sync::Arc;

use serde_json::Value;

use crate::clickup::memory::InMemoryClickUp;
use crate::mcp::dispatcher::Dispatcher;
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::ToolFilter;
use crate::mcp::tools::{ToolContext, default_registry};

/// Every tool wired to a call-recording in-memory backend.
pub struct Harness {
    pub backend: Arc<InMemoryClickUp>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_filter(ToolFilter::allow_all())
    }

    pub fn with_filter(filter: ToolFilter) -> Self {
        let backend = Arc::new(InMemoryClickUp::new());
        let context = ToolContext::new(backend.clone());
        Self {
            dispatcher: Dispatcher::new(default_registry(), filter, context),
            backend,
        }
    }

    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult<Envelope> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => panic!("arguments must be an object, got {other}"),
        };
        self.dispatcher.invoke(name, arguments).await
    }

    /// Call and unwrap, returning the envelope as JSON.
    pub async fn ok(&self, name: &str, arguments: Value) -> Value {
        match self.call(name, arguments).await {
            Ok(envelope) => envelope.to_value(),
            Err(e) => panic!("{name} failed: {e}"),
        }
    }

    pub async fn err(&self, name: &str, arguments: Value) -> ToolError {
        match self.call(name, arguments).await {
            Ok(envelope) => panic!("{name} unexpectedly succeeded: {}", envelope.to_value()),
            Err(e) => e,
        }
    }
}

/// Assert the error is an invalid-params failure mentioning `fragment`.
pub fn assert_invalid(error: &ToolError, fragment: &str) {
    assert!(
        error.is_invalid_params(),
        "expected invalid params, got {error:?}"
    );
    assert!(
        error.to_string().contains(fragment),
        "'{error}' does not mention '{fragment}'"
    );
}
