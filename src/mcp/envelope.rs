//! Success envelope returned by every tool.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ToolResult;

/// `{"success": true, "message": "...", <key>: <payload>...}`
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    success: bool,
    message: String,
    data: Map<String, Value>,
}

impl Envelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Map::new(),
        }
    }

    /// Add a payload entry under `key`.
    pub fn with(mut self, key: &str, value: impl Serialize) -> ToolResult<Self> {
        self.data
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Mark the call as only partly successful (bulk runs with failed items).
    pub fn partial(mut self) -> Self {
        self.success = false;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("success".to_string(), Value::Bool(self.success));
        object.insert("message".to_string(), Value::String(self.message.clone()));
        for (key, value) in &self.data {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }

    /// Pretty-printed JSON as a single text content item.
    pub fn into_call_result(self) -> CallToolResult {
        let value = self.to_value();
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        if self.success {
            CallToolResult::success(vec![Content::text(text)])
        } else {
            CallToolResult::error(vec![Content::text(text)])
        }
    }
}
