//! MCP tool implementations
//!
//! One module per resource family. Every handler is an
//! `async fn(ToolContext, Params) -> ToolResult<Envelope>`; each module's
//! `register` adds its handlers to the registry.
//!
//! Handlers check reference presence and update payloads before touching the
//! backend, so a malformed call never costs a round-trip.

mod bulk;
mod dates;
mod documents;
mod folders;
mod lists;
mod members;
mod spaces;
mod tags;
mod tasks;
mod time;
mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clickup::{ClickUpApi, find_unique_by_name, models::TaskQuery};
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::ToolRegistry;

pub use dates::{DateInput, parse_date, parse_duration};

/// Upper bound on task pages scanned when resolving a task by name.
const MAX_TASK_PAGES: u32 = 10;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ToolContext {
    api: Arc<dyn ClickUpApi>,
}

impl ToolContext {
    pub fn new(api: Arc<dyn ClickUpApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn ClickUpApi {
        self.api.as_ref()
    }
}

/// Register every tool family.
pub fn register_all(registry: &mut ToolRegistry) {
    workspace::register(registry);
    members::register(registry);
    spaces::register(registry);
    folders::register(registry);
    lists::register(registry);
    tasks::register(registry);
    bulk::register(registry);
    tags::register(registry);
    time::register(registry);
    documents::register(registry);
}

/// A registry holding every tool.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry);
    registry
}

/// Parameters of tools that take no input.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A resource given by id or by name. The id wins when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Id(&'a str),
    Name(&'a str),
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl<'a> Reference<'a> {
    pub fn from_parts(id: &'a Option<String>, name: &'a Option<String>) -> Option<Self> {
        present(id)
            .map(Reference::Id)
            .or_else(|| present(name).map(Reference::Name))
    }

    /// Like [`Reference::from_parts`], failing with invalid params when both are absent.
    pub fn require(
        id: &'a Option<String>,
        name: &'a Option<String>,
        id_field: &str,
        name_field: &str,
    ) -> ToolResult<Self> {
        Self::from_parts(id, name).ok_or_else(|| {
            ToolError::invalid_params(format!(
                "Either {id_field} or {name_field} must be provided"
            ))
        })
    }
}

/// Trimmed, non-empty string or invalid params naming `field`.
pub fn required_text<'a>(value: &'a Option<String>, field: &str) -> ToolResult<&'a str> {
    present(value).ok_or_else(|| ToolError::invalid_params(format!("{field} is required")))
}

/// Like [`required_text`] for fields the schema already marks required.
pub fn non_empty<'a>(value: &'a str, field: &str) -> ToolResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ToolError::invalid_params(format!("{field} must not be empty")))
    } else {
        Ok(trimmed)
    }
}

/// ClickUp priority: 1 urgent, 2 high, 3 normal, 4 low.
pub fn check_priority(priority: u8) -> ToolResult<u8> {
    if (1..=4).contains(&priority) {
        Ok(priority)
    } else {
        Err(ToolError::invalid_params(format!(
            "priority must be between 1 (urgent) and 4 (low), got {priority}"
        )))
    }
}

impl ToolContext {
    pub async fn space_id(&self, space: Reference<'_>) -> ToolResult<String> {
        match space {
            Reference::Id(id) => Ok(id.to_string()),
            Reference::Name(name) => {
                debug!(name, "resolving space by name");
                let spaces = self.api.spaces().list(false).await?;
                let found = find_unique_by_name("space", name, &spaces, |s| s.name.as_str())?;
                Ok(found.id.clone())
            }
        }
    }

    /// Space ids to scan: the given space, or every space in the workspace.
    async fn space_scope(&self, space: Option<Reference<'_>>) -> ToolResult<Vec<String>> {
        match space {
            Some(space) => Ok(vec![self.space_id(space).await?]),
            None => Ok(self
                .api
                .spaces()
                .list(false)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect()),
        }
    }

    pub async fn folder_id(
        &self,
        folder: Reference<'_>,
        space: Option<Reference<'_>>,
    ) -> ToolResult<String> {
        let name = match folder {
            Reference::Id(id) => return Ok(id.to_string()),
            Reference::Name(name) => name,
        };
        debug!(name, "resolving folder by name");
        let mut folders = Vec::new();
        for space_id in self.space_scope(space).await? {
            folders.extend(self.api.folders().list(&space_id).await?);
        }
        let found = find_unique_by_name("folder", name, &folders, |f| f.name.as_str())?;
        Ok(found.id.clone())
    }

    pub async fn list_id(
        &self,
        list: Reference<'_>,
        space: Option<Reference<'_>>,
    ) -> ToolResult<String> {
        let name = match list {
            Reference::Id(id) => return Ok(id.to_string()),
            Reference::Name(name) => name,
        };
        debug!(name, "resolving list by name");
        let mut lists = Vec::new();
        for space_id in self.space_scope(space).await? {
            lists.extend(self.api.lists().list_folderless(&space_id).await?);
            for folder in self.api.folders().list(&space_id).await? {
                lists.extend(folder.lists);
            }
        }
        let found = find_unique_by_name("list", name, &lists, |l| l.name.as_str())?;
        Ok(found.id.clone())
    }

    /// Resolve a task; a name is looked up inside `list` when given, else
    /// across the workspace.
    pub async fn task_id(
        &self,
        task: Reference<'_>,
        list: Option<Reference<'_>>,
    ) -> ToolResult<String> {
        let name = match task {
            Reference::Id(id) => return Ok(id.to_string()),
            Reference::Name(name) => name,
        };
        debug!(name, "resolving task by name");
        let list_id = match list {
            Some(list) => Some(self.list_id(list, None).await?),
            None => None,
        };

        let mut tasks = Vec::new();
        for page in 0..MAX_TASK_PAGES {
            let query = TaskQuery {
                page: Some(page),
                include_closed: Some(true),
                subtasks: Some(true),
                ..Default::default()
            };
            let batch = match &list_id {
                Some(list_id) => self.api.tasks().list_in_list(list_id, &query).await?,
                None => self.api.tasks().search(&query).await?,
            };
            let done = batch.tasks.is_empty() || batch.last_page == Some(true);
            tasks.extend(batch.tasks);
            if done {
                break;
            }
        }
        let found = find_unique_by_name("task", name, &tasks, |t| t.name.as_str())?;
        Ok(found.id.clone())
    }
}
