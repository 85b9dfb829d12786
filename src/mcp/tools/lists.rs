//! List tools.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::clickup::models::{CreateListRequest, UpdateListRequest};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::{DateInput, Reference, ToolContext, check_priority, non_empty};
use crate::serde_utils::double_option;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListParams {
    #[schemars(description = "Name of the new list")]
    pub name: String,
    #[schemars(description = "ID of the space to create the list in")]
    pub space_id: Option<String>,
    #[schemars(description = "Name of the space, used when spaceId is not given")]
    pub space_name: Option<String>,
    #[schemars(description = "List description")]
    pub content: Option<String>,
    #[schemars(description = "Due date: Unix milliseconds, YYYY-MM-DD, or phrases like 'next week'")]
    pub due_date: Option<DateInput>,
    #[schemars(description = "Priority: 1 (urgent), 2 (high), 3 (normal), 4 (low)")]
    pub priority: Option<u8>,
    #[schemars(description = "User ID of the list owner")]
    pub assignee: Option<i64>,
    #[schemars(description = "List status")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListInFolderParams {
    #[schemars(description = "Name of the new list")]
    pub name: String,
    #[schemars(description = "ID of the folder to create the list in")]
    pub folder_id: Option<String>,
    #[schemars(description = "Name of the folder, used when folderId is not given")]
    pub folder_name: Option<String>,
    #[schemars(description = "Space ID narrowing a folderName lookup")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name narrowing a folderName lookup")]
    pub space_name: Option<String>,
    #[schemars(description = "List description")]
    pub content: Option<String>,
    #[schemars(description = "List status")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRefParams {
    #[schemars(description = "List ID. Takes precedence over listName.")]
    pub list_id: Option<String>,
    #[schemars(description = "List name, resolved to an ID when listId is not given")]
    pub list_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListParams {
    #[schemars(description = "List ID. Takes precedence over listName.")]
    pub list_id: Option<String>,
    #[schemars(description = "List name, resolved to an ID when listId is not given")]
    pub list_name: Option<String>,
    #[schemars(description = "New list name")]
    pub name: Option<String>,
    #[schemars(description = "New list description")]
    pub content: Option<String>,
    #[schemars(description = "New list status")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schemars(
        with = "Option<DateInput>",
        description = "New due date, or null to clear it"
    )]
    pub due_date: Option<Option<DateInput>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schemars(
        with = "Option<u8>",
        description = "New priority 1-4, or null to clear it"
    )]
    pub priority: Option<Option<u8>>,
}

impl UpdateListParams {
    fn changes(&self) -> ToolResult<UpdateListRequest> {
        let due_date = match &self.due_date {
            Some(Some(date)) => Some(Some(date.to_millis("dueDate")?)),
            Some(None) => Some(None),
            None => None,
        };
        let priority = match self.priority {
            Some(Some(p)) => Some(Some(check_priority(p)?)),
            other => other,
        };
        Ok(UpdateListRequest {
            name: self.name.clone(),
            content: self.content.clone(),
            status: self.status.clone(),
            due_date,
            priority,
            assignee: None,
        })
    }
}

async fn create_list(ctx: ToolContext, params: CreateListParams) -> ToolResult<Envelope> {
    let name = non_empty(&params.name, "name")?;
    let space = Reference::require(&params.space_id, &params.space_name, "spaceId", "spaceName")?;
    let request = CreateListRequest {
        name: name.to_string(),
        content: params.content.clone(),
        due_date: params
            .due_date
            .as_ref()
            .map(|d| d.to_millis("dueDate"))
            .transpose()?,
        priority: params.priority.map(check_priority).transpose()?,
        assignee: params.assignee,
        status: params.status.clone(),
    };
    let space_id = ctx.space_id(space).await?;
    let list = ctx.api().lists().create_in_space(&space_id, &request).await?;
    Envelope::new(format!("List '{}' created with id {}", list.name, list.id)).with("list", list)
}

async fn create_list_in_folder(
    ctx: ToolContext,
    params: CreateListInFolderParams,
) -> ToolResult<Envelope> {
    let name = non_empty(&params.name, "name")?;
    let folder =
        Reference::require(&params.folder_id, &params.folder_name, "folderId", "folderName")?;
    let request = CreateListRequest {
        name: name.to_string(),
        content: params.content.clone(),
        status: params.status.clone(),
        ..Default::default()
    };
    let folder_id = ctx
        .folder_id(folder, Reference::from_parts(&params.space_id, &params.space_name))
        .await?;
    let list = ctx.api().lists().create_in_folder(&folder_id, &request).await?;
    Envelope::new(format!(
        "List '{}' created in folder {} with id {}",
        list.name, folder_id, list.id
    ))
    .with("list", list)
}

async fn get_list(ctx: ToolContext, params: ListRefParams) -> ToolResult<Envelope> {
    let list = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let id = ctx.list_id(list, None).await?;
    let list = ctx.api().lists().get(&id).await?;
    Envelope::new(format!("Retrieved list '{}' (id {})", list.name, list.id)).with("list", list)
}

async fn update_list(ctx: ToolContext, params: UpdateListParams) -> ToolResult<Envelope> {
    let list = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let changes = params.changes()?;
    if changes.is_empty() {
        return Err(ToolError::invalid_params("No update data provided"));
    }
    let id = ctx.list_id(list, None).await?;
    let list = ctx.api().lists().update(&id, &changes).await?;
    Envelope::new(format!("List '{}' (id {}) updated", list.name, list.id)).with("list", list)
}

async fn delete_list(ctx: ToolContext, params: ListRefParams) -> ToolResult<Envelope> {
    let list = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let id = ctx.list_id(list, None).await?;
    ctx.api().lists().delete(&id).await?;
    Envelope::new(format!("List {id} deleted")).with("listId", id)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::List,
        "create_list",
        "Create a list directly in a space (outside any folder). Give spaceId or spaceName.",
        create_list,
    );
    registry.register(
        ToolFamily::List,
        "create_list_in_folder",
        "Create a list inside a folder given by folderId, or folderName with optional spaceId/spaceName.",
        create_list_in_folder,
    );
    registry.register(
        ToolFamily::List,
        "get_list",
        "Get a list by listId or listName.",
        get_list,
    );
    registry.register(
        ToolFamily::List,
        "update_list",
        "Update a list's name, description, status, due date or priority. Pass null to clear the due date or priority.",
        update_list,
    );
    registry.register(
        ToolFamily::List,
        "delete_list",
        "Delete a list and all of its tasks.",
        delete_list,
    );
}
