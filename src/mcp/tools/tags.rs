//! Space tag tools and tagging of tasks.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::clickup::{
    ClickUpError, find_unique_by_name,
    models::{CreateTagRequest, UpdateTagRequest},
};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::tasks::TaskRef;
use crate::mcp::tools::{Reference, ToolContext, non_empty};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceTagsParams {
    #[schemars(description = "Space ID")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name, used when spaceId is not given")]
    pub space_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceTagParams {
    #[schemars(description = "Space ID")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name, used when spaceId is not given")]
    pub space_name: Option<String>,
    #[schemars(description = "Name of the new tag")]
    pub tag_name: String,
    #[schemars(description = "Background color as hex, e.g. #FF0000")]
    pub tag_bg: Option<String>,
    #[schemars(description = "Text color as hex, e.g. #FFFFFF")]
    pub tag_fg: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceTagParams {
    #[schemars(description = "Space ID")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name, used when spaceId is not given")]
    pub space_name: Option<String>,
    #[schemars(description = "Current tag name")]
    pub tag_name: String,
    #[schemars(description = "New tag name")]
    pub new_tag_name: Option<String>,
    #[schemars(description = "New background color as hex")]
    pub tag_bg: Option<String>,
    #[schemars(description = "New text color as hex")]
    pub tag_fg: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSpaceTagParams {
    #[schemars(description = "Space ID")]
    pub space_id: Option<String>,
    #[schemars(description = "Space name, used when spaceId is not given")]
    pub space_name: Option<String>,
    #[schemars(description = "Name of the tag to delete")]
    pub tag_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskTagParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[schemars(description = "Tag name")]
    pub tag_name: String,
}

/// `#RGB` or `#RRGGBB`.
fn check_color(value: Option<&String>, field: &str) -> ToolResult<Option<String>> {
    let Some(color) = value else {
        return Ok(None);
    };
    let hex = color.strip_prefix('#').unwrap_or("");
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(Some(color.clone()))
    } else {
        Err(ToolError::invalid_params(format!(
            "{field} must be a hex color like #FF0000, got '{color}'"
        )))
    }
}

fn space_reference<'a>(id: &'a Option<String>, name: &'a Option<String>) -> ToolResult<Reference<'a>> {
    Reference::require(id, name, "spaceId", "spaceName")
}

async fn get_space_tags(ctx: ToolContext, params: SpaceTagsParams) -> ToolResult<Envelope> {
    let space = space_reference(&params.space_id, &params.space_name)?;
    let space_id = ctx.space_id(space).await?;
    let tags = ctx.api().tags().list(&space_id).await?;
    Envelope::new(format!("Found {} tags in space {}", tags.len(), space_id))
        .with("count", tags.len())?
        .with("tags", tags)
}

async fn create_space_tag(ctx: ToolContext, params: CreateSpaceTagParams) -> ToolResult<Envelope> {
    let space = space_reference(&params.space_id, &params.space_name)?;
    let request = CreateTagRequest {
        name: non_empty(&params.tag_name, "tagName")?.to_string(),
        tag_bg: check_color(params.tag_bg.as_ref(), "tagBg")?,
        tag_fg: check_color(params.tag_fg.as_ref(), "tagFg")?,
    };
    let space_id = ctx.space_id(space).await?;
    let tag = ctx.api().tags().create(&space_id, &request).await?;
    Envelope::new(format!("Tag '{}' created in space {}", tag.name, space_id)).with("tag", tag)
}

async fn update_space_tag(ctx: ToolContext, params: UpdateSpaceTagParams) -> ToolResult<Envelope> {
    let space = space_reference(&params.space_id, &params.space_name)?;
    let tag_name = non_empty(&params.tag_name, "tagName")?;
    let request = UpdateTagRequest {
        name: params.new_tag_name.clone(),
        bg_color: check_color(params.tag_bg.as_ref(), "tagBg")?,
        fg_color: check_color(params.tag_fg.as_ref(), "tagFg")?,
    };
    if request.is_empty() {
        return Err(ToolError::invalid_params("No update data provided"));
    }
    let space_id = ctx.space_id(space).await?;
    let tag = ctx.api().tags().update(&space_id, tag_name, &request).await?;
    Envelope::new(format!("Tag '{}' updated in space {}", tag.name, space_id)).with("tag", tag)
}

async fn delete_space_tag(ctx: ToolContext, params: DeleteSpaceTagParams) -> ToolResult<Envelope> {
    let space = space_reference(&params.space_id, &params.space_name)?;
    let tag_name = non_empty(&params.tag_name, "tagName")?;
    let space_id = ctx.space_id(space).await?;
    ctx.api().tags().delete(&space_id, tag_name).await?;
    Envelope::new(format!("Tag '{tag_name}' deleted from space {space_id}"))
        .with("tagName", tag_name)
}

async fn add_tag_to_task(ctx: ToolContext, params: TaskTagParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let wanted = non_empty(&params.tag_name, "tagName")?;
    let task_id = params.task.resolve(&ctx).await?;

    // The tag must already exist in the task's space.
    let task = ctx.api().tasks().get(&task_id, false).await?;
    let space_id = task
        .space
        .as_ref()
        .map(|s| s.id.clone())
        .ok_or_else(|| ToolError::execution(format!("Task {task_id} has no space")))?;
    let tags = ctx.api().tags().list(&space_id).await?;
    let tag = find_unique_by_name("tag", wanted, &tags, |t| t.name.as_str()).map_err(|e| match e {
        ClickUpError::NotFound { .. } => {
            ClickUpError::not_found("tag", format!("'{wanted}' in space {space_id}"))
        }
        other => other,
    })?;

    ctx.api().tags().add_to_task(&task.id, &tag.name).await?;
    Envelope::new(format!("Tag '{}' added to task {}", tag.name, task.id))
        .with("taskId", &task.id)?
        .with("tagName", &tag.name)
}

async fn remove_tag_from_task(ctx: ToolContext, params: TaskTagParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let tag_name = non_empty(&params.tag_name, "tagName")?;
    let task_id = params.task.resolve(&ctx).await?;
    ctx.api().tags().remove_from_task(&task_id, tag_name).await?;
    Envelope::new(format!("Tag '{tag_name}' removed from task {task_id}"))
        .with("taskId", &task_id)?
        .with("tagName", tag_name)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Tag,
        "get_space_tags",
        "List the tags defined in a space (spaceId or spaceName).",
        get_space_tags,
    );
    registry.register(
        ToolFamily::Tag,
        "create_space_tag",
        "Create a tag in a space, with optional hex background and text colors.",
        create_space_tag,
    );
    registry.register(
        ToolFamily::Tag,
        "update_space_tag",
        "Rename a space tag or change its colors.",
        update_space_tag,
    );
    registry.register(
        ToolFamily::Tag,
        "delete_space_tag",
        "Delete a tag from a space.",
        delete_space_tag,
    );
    registry.register(
        ToolFamily::Tag,
        "add_tag_to_task",
        "Add an existing space tag to a task. Fails if the tag does not exist in the task's space.",
        add_tag_to_task,
    );
    registry.register(
        ToolFamily::Tag,
        "remove_tag_from_task",
        "Remove a tag from a task.",
        remove_tag_from_task,
    );
}
