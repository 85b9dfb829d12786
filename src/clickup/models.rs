//! ClickUp resource models and request payloads.
//!
//! Response models keep the fields the tools report back. Request payloads
//! only serialize fields that are present, so an absent field is never sent
//! and never clears anything on the backend.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::serde_utils::{opt_string_or_number, string_or_number};

// =============================================================================
// Shared Types
// =============================================================================

/// A `{id, name}` reference embedded in other resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// A workspace member (ClickUp `user`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_bg: Option<String>,
}

// =============================================================================
// Spaces
// =============================================================================

/// A simple on/off feature toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureToggle {
    #[schemars(description = "Whether the feature is enabled")]
    pub enabled: bool,
}

/// Due date feature with its extra switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DueDatesFeature {
    #[schemars(description = "Whether due dates are enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Allow start dates")]
    pub start_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Remap due dates when moving tasks")]
    pub remap_due_dates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Remap due dates of closed tasks")]
    pub remap_closed_due_date: Option<bool>,
}

/// ClickApps that can be switched on or off per space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpaceFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_dates: Option<DueDatesFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_tracking: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimates: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklists: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remap_dependencies: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_warning: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolios: Option<FeatureToggle>,
}

/// A workflow status as configured on a space or list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_assignees: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<SpaceFeatures>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_assignees: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<SpaceFeatures>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSpaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_can_manage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_assignees: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<SpaceFeatures>,
}

impl UpdateSpaceRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// =============================================================================
// Folders & Lists
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<ResourceRef>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_count: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<List>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_statuses: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<serde_json::Value>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<ResourceRef>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateListRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// =============================================================================
// Tasks
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPriority {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_created: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_updated: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Task>,
}

/// One page of tasks from a list or workspace query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPage {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_all: Option<bool>,
}

/// Assignee delta for task updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssigneeChanges {
    pub add: Vec<i64>,
    pub rem: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<AssigneeChanges>,
}

impl UpdateTaskRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters forwarded verbatim to the list and workspace task endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub page: Option<u32>,
    pub order_by: Option<String>,
    pub reverse: Option<bool>,
    pub subtasks: Option<bool>,
    pub include_closed: Option<bool>,
    pub archived: Option<bool>,
    pub statuses: Vec<String>,
    pub assignees: Vec<String>,
    pub tags: Vec<String>,
    pub list_ids: Vec<String>,
    pub folder_ids: Vec<String>,
    pub space_ids: Vec<String>,
    pub due_date_gt: Option<i64>,
    pub due_date_lt: Option<i64>,
    pub date_created_gt: Option<i64>,
    pub date_created_lt: Option<i64>,
    pub date_updated_gt: Option<i64>,
    pub date_updated_lt: Option<i64>,
}

impl TaskQuery {
    /// Render as ClickUp query pairs; array filters use the `name[]` form.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let mut scalar = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                pairs.push((key.to_string(), v));
            }
        };
        scalar("page", self.page.map(|p| p.to_string()));
        scalar("order_by", self.order_by.clone());
        scalar("reverse", self.reverse.map(|b| b.to_string()));
        scalar("subtasks", self.subtasks.map(|b| b.to_string()));
        scalar("include_closed", self.include_closed.map(|b| b.to_string()));
        scalar("archived", self.archived.map(|b| b.to_string()));
        scalar("due_date_gt", self.due_date_gt.map(|d| d.to_string()));
        scalar("due_date_lt", self.due_date_lt.map(|d| d.to_string()));
        scalar("date_created_gt", self.date_created_gt.map(|d| d.to_string()));
        scalar("date_created_lt", self.date_created_lt.map(|d| d.to_string()));
        scalar("date_updated_gt", self.date_updated_gt.map(|d| d.to_string()));
        scalar("date_updated_lt", self.date_updated_lt.map(|d| d.to_string()));

        let arrays: [(&str, &Vec<String>); 6] = [
            ("statuses[]", &self.statuses),
            ("assignees[]", &self.assignees),
            ("tags[]", &self.tags),
            ("list_ids[]", &self.list_ids),
            ("folder_ids[]", &self.folder_ids),
            ("space_ids[]", &self.space_ids),
        ];
        for (key, values) in arrays {
            for value in values {
                pairs.push((key.to_string(), value.clone()));
            }
        }

        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub comment_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCommentRequest {
    pub comment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    pub notify_all: bool,
}

// =============================================================================
// Tags
// =============================================================================

/// Body for creating a space tag (wrapped as `{"tag": ...}` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_bg: Option<String>,
}

/// Body for editing a space tag (wrapped as `{"tag": ...}` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTagRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

impl UpdateTagRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// =============================================================================
// Time Tracking
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryTask {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TimeEntryTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<String>,
    /// Milliseconds; negative while a timer is running.
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryQuery {
    pub task_id: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartTimerRequest {
    pub tid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagName>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTimeEntryRequest {
    pub tid: String,
    pub start: i64,
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagName>>,
}

// =============================================================================
// Docs (API v3)
// =============================================================================

/// Where a doc lives. `type`: 4 space, 5 folder, 6 list, 7 everything, 12 workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocParent {
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(description = "Id of the parent container")]
    pub id: String,
    #[serde(rename = "type")]
    #[schemars(
        description = "Parent type: 4 = space, 5 = folder, 6 = list, 7 = everything, 12 = workspace"
    )]
    pub kind: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<DocParent>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub workspace_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocList {
    #[serde(default)]
    pub docs: Vec<Doc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocSearchQuery {
    pub id: Option<String>,
    pub creator: Option<i64>,
    pub deleted: Option<bool>,
    pub archived: Option<bool>,
    pub parent_id: Option<String>,
    pub parent_type: Option<String>,
    pub limit: Option<u32>,
    pub next_cursor: Option<String>,
}

impl DocSearchQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                pairs.push((key.to_string(), v));
            }
        };
        push("id", self.id.clone());
        push("creator", self.creator.map(|c| c.to_string()));
        push("deleted", self.deleted.map(|b| b.to_string()));
        push("archived", self.archived.map(|b| b.to_string()));
        push("parent_id", self.parent_id.clone());
        push("parent_type", self.parent_type.clone());
        push("limit", self.limit.map(|l| l.to_string()));
        push("next_cursor", self.next_cursor.clone());
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDocRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<DocParent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_page: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocPage {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<DocPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_page_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_edit_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_format: Option<String>,
}

impl UpdatePageRequest {
    /// True when nothing besides formatting options would change.
    pub fn has_no_changes(&self) -> bool {
        self.name.is_none() && self.sub_title.is_none() && self.content.is_none()
    }
}
