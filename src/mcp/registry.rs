//! Tool registry
//!
//! Maps tool names to descriptors and handlers. Built once at startup by
//! [`crate::mcp::tools::register_all`] and never mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::{
    model::{JsonObject, Tool},
    schemars::{self, JsonSchema},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::Envelope;
use super::error::{ToolError, ToolResult};
use super::tools::ToolContext;

/// Resource family a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    Workspace,
    Member,
    Space,
    Folder,
    List,
    Task,
    Bulk,
    Tag,
    Time,
    Document,
}

/// Name, description and input schema of one tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub family: ToolFamily,
    pub input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::clone(&self.input_schema))
    }
}

/// JSON schema object for a parameter struct.
pub fn input_schema<P: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(P);
    match serde_json::to_value(schema) {
        Ok(Value::Object(mut map)) => {
            map.remove("$schema");
            Arc::new(map)
        }
        _ => Arc::new(JsonObject::new()),
    }
}

/// Uniform invocation interface for registered tools.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, context: &ToolContext, arguments: JsonObject) -> ToolResult<Envelope>;
}

/// Adapts `async fn(ToolContext, P) -> ToolResult<Envelope>` to [`ToolHandler`].
struct TypedHandler<P, F> {
    handler: F,
    _params: PhantomData<fn() -> P>,
}

#[async_trait]
impl<P, F, Fut> ToolHandler for TypedHandler<P, F>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(ToolContext, P) -> Fut + Send + Sync,
    Fut: Future<Output = ToolResult<Envelope>> + Send + 'static,
{
    async fn call(&self, context: &ToolContext, arguments: JsonObject) -> ToolResult<Envelope> {
        let params: P = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_params(e.to_string()))?;
        (self.handler)(context.clone(), params).await
    }
}

pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    handler: Box<dyn ToolHandler>,
}

impl ToolEntry {
    pub async fn call(&self, context: &ToolContext, arguments: JsonObject) -> ToolResult<Envelope> {
        self.handler.call(context, arguments).await
    }
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; the input schema is derived from `P`.
    pub fn register<P, F, Fut>(
        &mut self,
        family: ToolFamily,
        name: &'static str,
        description: &'static str,
        handler: F,
    ) where
        P: JsonSchema + DeserializeOwned + Send + 'static,
        F: Fn(ToolContext, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult<Envelope>> + Send + 'static,
    {
        let descriptor = ToolDescriptor {
            name,
            description,
            family,
            input_schema: input_schema::<P>(),
        };
        let handler = TypedHandler {
            handler,
            _params: PhantomData,
        };
        self.tools.insert(
            name,
            ToolEntry {
                descriptor,
                handler: Box::new(handler),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.get(name)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values().map(|entry| &entry.descriptor)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Which registered tools are exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    disabled: HashSet<String>,
    document_support: bool,
}

impl ToolFilter {
    pub fn new<I, S>(disabled: I, document_support: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            disabled: disabled.into_iter().map(Into::into).collect(),
            document_support,
        }
    }

    /// Every tool enabled, documents included.
    pub fn allow_all() -> Self {
        Self::new(Vec::<String>::new(), true)
    }

    pub fn is_disabled_name(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    pub fn is_enabled(&self, descriptor: &ToolDescriptor) -> bool {
        if self.is_disabled_name(descriptor.name) {
            return false;
        }
        descriptor.family != ToolFamily::Document || self.document_support
    }
}
