//! Folder tools.
//!
//! A folder can be named instead of identified; `spaceId`/`spaceName` narrow
//! the lookup, otherwise every space in the workspace is searched.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::clickup::models::FolderRequest;
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::{Reference, ToolContext, non_empty, required_text};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderParams {
    #[schemars(description = "Name of the new folder")]
    pub name: String,
    #[schemars(description = "ID of the space to create the folder in")]
    pub space_id: Option<String>,
    #[schemars(description = "Name of the space, used when spaceId is not given")]
    pub space_name: Option<String>,
    #[serde(rename = "override_statuses")]
    #[schemars(description = "Give the folder its own statuses instead of the space's")]
    pub override_statuses: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderRefParams {
    #[schemars(description = "Folder ID. Takes precedence over folderName.")]
    pub folder_id: Option<String>,
    #[schemars(description = "Folder name, resolved to an ID when folderId is not given")]
    pub folder_name: Option<String>,
    #[schemars(description = "Space ID narrowing a folderName lookup")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name narrowing a folderName lookup")]
    pub space_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderParams {
    #[schemars(description = "Folder ID. Takes precedence over folderName.")]
    pub folder_id: Option<String>,
    #[schemars(description = "Folder name, resolved to an ID when folderId is not given")]
    pub folder_name: Option<String>,
    #[schemars(description = "Space ID narrowing a folderName lookup")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name narrowing a folderName lookup")]
    pub space_name: Option<String>,
    #[schemars(description = "New folder name")]
    pub name: Option<String>,
    #[serde(rename = "override_statuses")]
    #[schemars(description = "Give the folder its own statuses instead of the space's")]
    pub override_statuses: Option<bool>,
}

impl ToolContext {
    async fn resolve_folder(
        &self,
        folder: Reference<'_>,
        space_id: &Option<String>,
        space_name: &Option<String>,
    ) -> ToolResult<String> {
        self.folder_id(folder, Reference::from_parts(space_id, space_name))
            .await
    }
}

async fn create_folder(ctx: ToolContext, params: CreateFolderParams) -> ToolResult<Envelope> {
    let name = non_empty(&params.name, "name")?;
    let space = Reference::require(&params.space_id, &params.space_name, "spaceId", "spaceName")?;
    let space_id = ctx.space_id(space).await?;
    let request = FolderRequest {
        name: name.to_string(),
        override_statuses: params.override_statuses,
    };
    let folder = ctx.api().folders().create(&space_id, &request).await?;
    Envelope::new(format!("Folder '{}' created with id {}", folder.name, folder.id))
        .with("folder", folder)
}

async fn get_folder(ctx: ToolContext, params: FolderRefParams) -> ToolResult<Envelope> {
    let folder =
        Reference::require(&params.folder_id, &params.folder_name, "folderId", "folderName")?;
    let id = ctx
        .resolve_folder(folder, &params.space_id, &params.space_name)
        .await?;
    let folder = ctx.api().folders().get(&id).await?;
    Envelope::new(format!("Retrieved folder '{}' (id {})", folder.name, folder.id))
        .with("folder", folder)
}

async fn update_folder(ctx: ToolContext, params: UpdateFolderParams) -> ToolResult<Envelope> {
    let folder =
        Reference::require(&params.folder_id, &params.folder_name, "folderId", "folderName")?;
    let new_name = required_text(&params.name, "name").ok();
    if new_name.is_none() && params.override_statuses.is_none() {
        return Err(ToolError::invalid_params("No update data provided"));
    }
    let id = ctx
        .resolve_folder(folder, &params.space_id, &params.space_name)
        .await?;

    // The endpoint always wants a name.
    let name = match new_name {
        Some(name) => name.to_string(),
        None => ctx.api().folders().get(&id).await?.name,
    };
    let request = FolderRequest {
        name,
        override_statuses: params.override_statuses,
    };
    let folder = ctx.api().folders().update(&id, &request).await?;
    Envelope::new(format!("Folder '{}' (id {}) updated", folder.name, folder.id))
        .with("folder", folder)
}

async fn delete_folder(ctx: ToolContext, params: FolderRefParams) -> ToolResult<Envelope> {
    let folder =
        Reference::require(&params.folder_id, &params.folder_name, "folderId", "folderName")?;
    let id = ctx
        .resolve_folder(folder, &params.space_id, &params.space_name)
        .await?;
    ctx.api().folders().delete(&id).await?;
    Envelope::new(format!("Folder {id} deleted")).with("folderId", id)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Folder,
        "create_folder",
        "Create a folder in a space given by spaceId or spaceName.",
        create_folder,
    );
    registry.register(
        ToolFamily::Folder,
        "get_folder",
        "Get a folder by folderId, or by folderName (optionally within spaceId/spaceName). Includes its lists.",
        get_folder,
    );
    registry.register(
        ToolFamily::Folder,
        "update_folder",
        "Rename a folder or change whether it overrides the space statuses.",
        update_folder,
    );
    registry.register(
        ToolFamily::Folder,
        "delete_folder",
        "Delete a folder and every list inside it.",
        delete_folder,
    );
}
