//! Space tools.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::clickup::models::{CreateSpaceRequest, SpaceFeatures, UpdateSpaceRequest};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::{Reference, ToolContext, non_empty};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetSpacesParams {
    #[schemars(description = "Include archived spaces (default: false)")]
    pub archived: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SpaceRefParams {
    #[schemars(description = "Space ID. Takes precedence over space_name.")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name, resolved to an ID when space_id is not given")]
    pub space_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateSpaceParams {
    #[schemars(description = "Name of the new space")]
    pub name: String,
    #[schemars(description = "Allow more than one assignee per task")]
    pub multiple_assignees: Option<bool>,
    #[schemars(description = "ClickApps to enable or disable on the space")]
    pub features: Option<SpaceFeatures>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateSpaceParams {
    #[schemars(description = "Space ID. Takes precedence over space_name.")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name, resolved to an ID when space_id is not given")]
    pub space_name: Option<String>,
    #[schemars(description = "New space name")]
    pub name: Option<String>,
    #[schemars(description = "Space color as hex, e.g. #7B68EE")]
    pub color: Option<String>,
    #[schemars(description = "Make the space private")]
    pub private: Option<bool>,
    #[schemars(description = "Let admins manage the space")]
    pub admin_can_manage: Option<bool>,
    #[schemars(description = "Allow more than one assignee per task")]
    pub multiple_assignees: Option<bool>,
    #[schemars(description = "ClickApps to enable or disable on the space")]
    pub features: Option<SpaceFeatures>,
}

impl UpdateSpaceParams {
    fn changes(&self) -> UpdateSpaceRequest {
        UpdateSpaceRequest {
            name: self.name.clone(),
            color: self.color.clone(),
            private: self.private,
            admin_can_manage: self.admin_can_manage,
            multiple_assignees: self.multiple_assignees,
            features: self.features.clone(),
        }
    }
}

fn space_reference(params: &SpaceRefParams) -> ToolResult<Reference<'_>> {
    Reference::require(&params.space_id, &params.space_name, "space_id", "space_name")
}

// =============================================================================
// Handlers
// =============================================================================

async fn get_spaces(ctx: ToolContext, params: GetSpacesParams) -> ToolResult<Envelope> {
    let spaces = ctx
        .api()
        .spaces()
        .list(params.archived.unwrap_or(false))
        .await?;
    Envelope::new(format!("Found {} spaces", spaces.len()))
        .with("count", spaces.len())?
        .with("spaces", spaces)
}

async fn get_space(ctx: ToolContext, params: SpaceRefParams) -> ToolResult<Envelope> {
    let reference = space_reference(&params)?;
    let id = ctx.space_id(reference).await?;
    let space = ctx.api().spaces().get(&id).await?;
    Envelope::new(format!("Retrieved space '{}' (id {})", space.name, space.id)).with("space", space)
}

async fn create_space(ctx: ToolContext, params: CreateSpaceParams) -> ToolResult<Envelope> {
    let request = CreateSpaceRequest {
        name: non_empty(&params.name, "name")?.to_string(),
        multiple_assignees: params.multiple_assignees,
        features: params.features,
    };
    let space = ctx.api().spaces().create(&request).await?;
    Envelope::new(format!("Space '{}' created with id {}", space.name, space.id)).with("space", space)
}

async fn update_space(ctx: ToolContext, params: UpdateSpaceParams) -> ToolResult<Envelope> {
    let reference =
        Reference::require(&params.space_id, &params.space_name, "space_id", "space_name")?;
    let changes = params.changes();
    if changes.is_empty() {
        return Err(ToolError::invalid_params("No update data provided"));
    }
    let id = ctx.space_id(reference).await?;
    let space = ctx.api().spaces().update(&id, &changes).await?;
    Envelope::new(format!("Space '{}' (id {}) updated", space.name, space.id)).with("space", space)
}

async fn delete_space(ctx: ToolContext, params: SpaceRefParams) -> ToolResult<Envelope> {
    let reference = space_reference(&params)?;
    let id = ctx.space_id(reference).await?;
    ctx.api().spaces().delete(&id).await?;
    Envelope::new(format!("Space {id} deleted")).with("space_id", id)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Space,
        "get_spaces",
        "List the spaces in the workspace. Archived spaces are left out unless archived is true.",
        get_spaces,
    );
    registry.register(
        ToolFamily::Space,
        "get_space",
        "Get one space by space_id or space_name, including its statuses and enabled features.",
        get_space,
    );
    registry.register(
        ToolFamily::Space,
        "create_space",
        "Create a space in the workspace. Optional features toggle ClickApps such as due dates, time tracking and tags.",
        create_space,
    );
    registry.register(
        ToolFamily::Space,
        "update_space",
        "Update a space identified by space_id or space_name. At least one field to change is required.",
        update_space,
    );
    registry.register(
        ToolFamily::Space,
        "delete_space",
        "Delete a space identified by space_id or space_name. This removes everything inside it.",
        delete_space,
    );
}
