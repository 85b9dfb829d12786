//! Workspace-wide tools: the space/folder/list tree and task search.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::clickup::models::List;
use crate::mcp::envelope::Envelope;
use crate::mcp::error::ToolResult;
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::tasks::{TaskFilters, task_summary};
use crate::mcp::tools::{NoParams, ToolContext};

/// `summary`: id, name, status, list, due date and url. `detailed`: the full task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    Summary,
    Detailed,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceTasksParams {
    #[serde(flatten)]
    pub filters: TaskFilters,
    #[schemars(description = "Only tasks in these lists")]
    pub list_ids: Option<Vec<String>>,
    #[schemars(description = "Only tasks in these folders")]
    pub folder_ids: Option<Vec<String>>,
    #[schemars(description = "Only tasks in these spaces")]
    pub space_ids: Option<Vec<String>>,
    #[schemars(description = "summary (default) or detailed")]
    pub detail_level: Option<DetailLevel>,
}

fn list_node(list: &List) -> Value {
    json!({"id": list.id, "name": list.name})
}

async fn get_workspace_hierarchy(ctx: ToolContext, _params: NoParams) -> ToolResult<Envelope> {
    let api = ctx.api();
    let spaces = api.spaces().list(false).await?;

    let mut nodes = Vec::with_capacity(spaces.len());
    let (mut folder_count, mut list_count) = (0, 0);
    for space in &spaces {
        debug!(space = %space.id, "walking space");
        let folders = api.folders().list(&space.id).await?;
        let lists = api.lists().list_folderless(&space.id).await?;
        folder_count += folders.len();
        list_count += lists.len() + folders.iter().map(|f| f.lists.len()).sum::<usize>();

        let folder_nodes: Vec<Value> = folders
            .iter()
            .map(|folder| {
                json!({
                    "id": folder.id,
                    "name": folder.name,
                    "lists": folder.lists.iter().map(list_node).collect::<Vec<_>>(),
                })
            })
            .collect();
        nodes.push(json!({
            "id": space.id,
            "name": space.name,
            "folders": folder_nodes,
            "lists": lists.iter().map(list_node).collect::<Vec<_>>(),
        }));
    }

    Envelope::new(format!(
        "Workspace has {} spaces, {} folders and {} lists",
        spaces.len(),
        folder_count,
        list_count
    ))
    .with(
        "workspace",
        json!({"id": api.workspace_id(), "spaces": nodes}),
    )
}

async fn get_workspace_tasks(
    ctx: ToolContext,
    params: WorkspaceTasksParams,
) -> ToolResult<Envelope> {
    let mut query = params.filters.to_query()?;
    query.list_ids = params.list_ids.unwrap_or_default();
    query.folder_ids = params.folder_ids.unwrap_or_default();
    query.space_ids = params.space_ids.unwrap_or_default();

    let page = ctx.api().tasks().search(&query).await?;
    let tasks: Vec<Value> = match params.detail_level.unwrap_or_default() {
        DetailLevel::Summary => page.tasks.iter().map(task_summary).collect(),
        DetailLevel::Detailed => page
            .tasks
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?,
    };

    Envelope::new(format!("Found {} tasks", tasks.len()))
        .with("count", tasks.len())?
        .with("last_page", page.last_page)?
        .with("tasks", tasks)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Workspace,
        "get_workspace_hierarchy",
        "Get the workspace tree: every space with its folders, the lists inside them, and folderless lists. Use it to find IDs.",
        get_workspace_hierarchy,
    );
    registry.register(
        ToolFamily::Workspace,
        "get_workspace_tasks",
        "Search tasks across the workspace. Filters (list_ids, space_ids, statuses, assignees, tags, dates) are passed to ClickUp; detail_level picks summary or detailed output.",
        get_workspace_tasks,
    );
}
