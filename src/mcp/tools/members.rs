//! Workspace member tools.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clickup::{ClickUpError, ClickUpResult, find_unique_by_name, models::User};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::{NoParams, ToolContext, non_empty};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindMemberParams {
    #[schemars(description = "Username, email address or user ID to look for")]
    pub name_or_email: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ResolveAssigneesParams {
    #[schemars(description = "Usernames, emails or user IDs to turn into ClickUp user IDs")]
    pub assignees: Vec<String>,
}

/// Match by id, then email (case-insensitive), then username under the
/// usual name policy. Duplicate usernames are ambiguous.
pub(crate) fn find_member<'a>(members: &'a [User], query: &str) -> ClickUpResult<&'a User> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ClickUpError::not_found("member", "''"));
    }
    let lowered = query.to_lowercase();
    if let Some(member) = members.iter().find(|m| m.id == query).or_else(|| {
        members.iter().find(|m| {
            m.email
                .as_deref()
                .is_some_and(|e| e.to_lowercase() == lowered)
        })
    }) {
        return Ok(member);
    }
    find_unique_by_name("member", query, members, |m| {
        m.username.as_deref().unwrap_or_default()
    })
}

async fn get_workspace_members(ctx: ToolContext, _params: NoParams) -> ToolResult<Envelope> {
    let members = ctx.api().members().list().await?;
    Envelope::new(format!("Found {} members", members.len()))
        .with("count", members.len())?
        .with("members", members)
}

async fn find_member_by_name(ctx: ToolContext, params: FindMemberParams) -> ToolResult<Envelope> {
    let query = non_empty(&params.name_or_email, "nameOrEmail")?;
    let members = ctx.api().members().list().await?;
    let member = find_member(&members, query)?;
    Envelope::new(format!(
        "Found member {} ({})",
        member.username.as_deref().unwrap_or("unnamed"),
        member.id
    ))
    .with("member", member)
}

async fn resolve_assignees(
    ctx: ToolContext,
    params: ResolveAssigneesParams,
) -> ToolResult<Envelope> {
    if params.assignees.is_empty() {
        return Err(ToolError::invalid_params("assignees must not be empty"));
    }
    let members = ctx.api().members().list().await?;

    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();
    for query in &params.assignees {
        match find_member(&members, query) {
            Ok(member) => resolved.push(json!({"input": query, "userId": member.id})),
            Err(ClickUpError::NotFound { .. }) => unresolved.push(query.clone()),
            Err(err) => return Err(err.into()),
        }
    }

    Envelope::new(format!(
        "Resolved {} of {} assignees",
        resolved.len(),
        params.assignees.len()
    ))
    .with("resolved", resolved)?
    .with("unresolved", unresolved)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Member,
        "get_workspace_members",
        "List every member of the workspace with their user ID, username and email.",
        get_workspace_members,
    );
    registry.register(
        ToolFamily::Member,
        "find_member_by_name",
        "Find one workspace member by username, email or user ID.",
        find_member_by_name,
    );
    registry.register(
        ToolFamily::Member,
        "resolve_assignees",
        "Turn usernames, emails or user IDs into ClickUp user IDs usable as task assignees. Unmatched entries are reported.",
        resolve_assignees,
    );
}
