//! Task and comment tools.
//!
//! Tasks are addressed by `taskId` (a ClickUp id or a custom id such as
//! `DEV-42`) or by `taskName`; `listName` narrows a name lookup to one list.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::clickup::models::{
    AssigneeChanges, CreateCommentRequest, CreateTaskRequest, Task, TaskQuery, UpdateTaskRequest,
};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::members::find_member;
use crate::mcp::tools::{
    DateInput, Reference, ToolContext, check_priority, non_empty, parse_duration,
};
use crate::serde_utils::double_option;

// =============================================================================
// Parameter Structs
// =============================================================================

/// Identifies one task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    #[schemars(description = "Task ID, or a custom task ID like DEV-42. Takes precedence over taskName.")]
    pub task_id: Option<String>,
    #[schemars(description = "Task name, resolved to an ID when taskId is not given")]
    pub task_name: Option<String>,
    #[schemars(description = "Name of the list to search when resolving taskName")]
    pub list_name: Option<String>,
}

impl TaskRef {
    pub fn reference(&self) -> ToolResult<Reference<'_>> {
        Reference::require(&self.task_id, &self.task_name, "taskId", "taskName")
    }

    /// Resolve to a task id. Callers check [`TaskRef::reference`] first.
    pub async fn resolve(&self, ctx: &ToolContext) -> ToolResult<String> {
        let task = self.reference()?;
        let list = Reference::from_parts(&None, &self.list_name);
        ctx.task_id(task, list).await
    }
}

/// Filters forwarded to ClickUp's task query endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TaskFilters {
    #[schemars(description = "Page to fetch, starting at 0. ClickUp returns up to 100 tasks per page.")]
    pub page: Option<u32>,
    #[schemars(description = "Sort field: id, created, updated or due_date")]
    pub order_by: Option<String>,
    #[schemars(description = "Reverse the sort order")]
    pub reverse: Option<bool>,
    #[schemars(description = "Include subtasks")]
    pub subtasks: Option<bool>,
    #[schemars(description = "Only tasks with one of these statuses")]
    pub statuses: Option<Vec<String>>,
    #[schemars(description = "Include closed tasks")]
    pub include_closed: Option<bool>,
    #[schemars(description = "Include archived tasks")]
    pub archived: Option<bool>,
    #[schemars(description = "Only tasks assigned to one of these user IDs")]
    pub assignees: Option<Vec<String>>,
    #[schemars(description = "Only tasks carrying one of these tags")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "Due after this date")]
    pub due_date_gt: Option<DateInput>,
    #[schemars(description = "Due before this date")]
    pub due_date_lt: Option<DateInput>,
    #[schemars(description = "Created after this date")]
    pub date_created_gt: Option<DateInput>,
    #[schemars(description = "Created before this date")]
    pub date_created_lt: Option<DateInput>,
    #[schemars(description = "Updated after this date")]
    pub date_updated_gt: Option<DateInput>,
    #[schemars(description = "Updated before this date")]
    pub date_updated_lt: Option<DateInput>,
}

fn millis(date: &Option<DateInput>, field: &str) -> ToolResult<Option<i64>> {
    date.as_ref().map(|d| d.to_millis(field)).transpose()
}

impl TaskFilters {
    pub fn to_query(&self) -> ToolResult<TaskQuery> {
        Ok(TaskQuery {
            page: self.page,
            order_by: self.order_by.clone(),
            reverse: self.reverse,
            subtasks: self.subtasks,
            include_closed: self.include_closed,
            archived: self.archived,
            statuses: self.statuses.clone().unwrap_or_default(),
            assignees: self.assignees.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
            due_date_gt: millis(&self.due_date_gt, "due_date_gt")?,
            due_date_lt: millis(&self.due_date_lt, "due_date_lt")?,
            date_created_gt: millis(&self.date_created_gt, "date_created_gt")?,
            date_created_lt: millis(&self.date_created_lt, "date_created_lt")?,
            date_updated_gt: millis(&self.date_updated_gt, "date_updated_gt")?,
            date_updated_lt: millis(&self.date_updated_lt, "date_updated_lt")?,
            ..Default::default()
        })
    }
}

/// Fields of a new task. Shared with `create_bulk_tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[schemars(description = "Task name")]
    pub name: Option<String>,
    #[schemars(description = "Plain text description")]
    pub description: Option<String>,
    #[serde(rename = "markdown_description")]
    #[schemars(description = "Markdown description; takes precedence over description")]
    pub markdown_description: Option<String>,
    #[schemars(description = "Status name, e.g. 'to do' or 'in progress'")]
    pub status: Option<String>,
    #[schemars(description = "Priority: 1 (urgent), 2 (high), 3 (normal), 4 (low)")]
    pub priority: Option<u8>,
    #[schemars(description = "Due date: Unix milliseconds, YYYY-MM-DD, YYYY-MM-DD HH:MM or phrases like 'tomorrow'")]
    pub due_date: Option<DateInput>,
    #[schemars(description = "Start date, same formats as dueDate")]
    pub start_date: Option<DateInput>,
    #[schemars(description = "Time estimate such as '2h 30m', '90m' or a number of minutes")]
    pub time_estimate: Option<String>,
    #[schemars(description = "Assignees as user IDs, usernames or emails")]
    pub assignees: Option<Vec<String>>,
    #[schemars(description = "Tag names; tags must already exist in the space")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "Parent task ID, to create a subtask")]
    pub parent: Option<String>,
    #[schemars(description = "Notify everyone on the task")]
    pub notify_all: Option<bool>,
}

impl NewTask {
    /// Validate and convert everything that needs no backend call.
    /// Assignees are resolved separately.
    pub fn to_request(&self) -> ToolResult<CreateTaskRequest> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ToolError::invalid_params("name is required"))?;
        Ok(CreateTaskRequest {
            name: name.to_string(),
            description: self.description.clone(),
            markdown_description: self.markdown_description.clone(),
            assignees: None,
            tags: self.tags.clone(),
            status: self.status.clone(),
            priority: self.priority.map(check_priority).transpose()?,
            due_date: millis(&self.due_date, "dueDate")?,
            due_date_time: None,
            start_date: millis(&self.start_date, "startDate")?,
            start_date_time: None,
            time_estimate: self
                .time_estimate
                .as_deref()
                .map(|t| {
                    parse_duration(t)
                        .map_err(|e| ToolError::invalid_params(format!("timeEstimate: {e}")))
                })
                .transpose()?,
            parent: self.parent.clone(),
            notify_all: self.notify_all,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskParams {
    #[schemars(description = "Task name")]
    pub name: String,
    #[schemars(description = "ID of the list to create the task in")]
    pub list_id: Option<String>,
    #[schemars(description = "Name of the list, used when listId is not given")]
    pub list_name: Option<String>,
    #[schemars(description = "Plain text description")]
    pub description: Option<String>,
    #[serde(rename = "markdown_description")]
    #[schemars(description = "Markdown description; takes precedence over description")]
    pub markdown_description: Option<String>,
    #[schemars(description = "Status name, e.g. 'to do' or 'in progress'")]
    pub status: Option<String>,
    #[schemars(description = "Priority: 1 (urgent), 2 (high), 3 (normal), 4 (low)")]
    pub priority: Option<u8>,
    #[schemars(description = "Due date: Unix milliseconds, YYYY-MM-DD, YYYY-MM-DD HH:MM or phrases like 'tomorrow'")]
    pub due_date: Option<DateInput>,
    #[schemars(description = "Start date, same formats as dueDate")]
    pub start_date: Option<DateInput>,
    #[schemars(description = "Time estimate such as '2h 30m', '90m' or a number of minutes")]
    pub time_estimate: Option<String>,
    #[schemars(description = "Assignees as user IDs, usernames or emails")]
    pub assignees: Option<Vec<String>>,
    #[schemars(description = "Tag names; tags must already exist in the space")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "Parent task ID, to create a subtask")]
    pub parent: Option<String>,
    #[schemars(description = "Notify everyone on the task")]
    pub notify_all: Option<bool>,
}

impl CreateTaskParams {
    fn new_task(&self) -> NewTask {
        NewTask {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            markdown_description: self.markdown_description.clone(),
            status: self.status.clone(),
            priority: self.priority,
            due_date: self.due_date.clone(),
            start_date: self.start_date.clone(),
            time_estimate: self.time_estimate.clone(),
            assignees: self.assignees.clone(),
            tags: self.tags.clone(),
            parent: self.parent.clone(),
            notify_all: self.notify_all,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTaskParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[schemars(description = "Include subtasks")]
    pub subtasks: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTasksParams {
    #[serde(rename = "listId")]
    #[schemars(description = "List ID")]
    pub list_id: Option<String>,
    #[serde(rename = "listName")]
    #[schemars(description = "List name, used when listId is not given")]
    pub list_name: Option<String>,
    #[serde(flatten)]
    pub filters: TaskFilters,
}

/// Changes to an existing task. Shared with `update_bulk_tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[schemars(description = "New task name")]
    pub name: Option<String>,
    #[schemars(description = "New plain text description")]
    pub description: Option<String>,
    #[serde(rename = "markdown_description")]
    #[schemars(description = "New markdown description")]
    pub markdown_description: Option<String>,
    #[schemars(description = "New status name")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schemars(with = "Option<u8>", description = "Priority 1-4, or null to clear it")]
    pub priority: Option<Option<u8>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schemars(with = "Option<DateInput>", description = "Due date, or null to clear it")]
    pub due_date: Option<Option<DateInput>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schemars(with = "Option<DateInput>", description = "Start date, or null to clear it")]
    pub start_date: Option<Option<DateInput>>,
    #[schemars(description = "Time estimate such as '2h 30m'")]
    pub time_estimate: Option<String>,
    #[schemars(description = "Archive or unarchive the task")]
    pub archived: Option<bool>,
    #[schemars(description = "Assignees to add, as user IDs, usernames or emails")]
    pub add_assignees: Option<Vec<String>>,
    #[schemars(description = "Assignees to remove, as user IDs, usernames or emails")]
    pub remove_assignees: Option<Vec<String>>,
}

fn clearable_date(
    date: &Option<Option<DateInput>>,
    field: &str,
) -> ToolResult<Option<Option<i64>>> {
    match date {
        Some(Some(d)) => Ok(Some(Some(d.to_millis(field)?))),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}

impl TaskChanges {
    /// The update payload without assignees, or invalid params when
    /// nothing would change.
    pub fn to_request(&self) -> ToolResult<UpdateTaskRequest> {
        let request = UpdateTaskRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            markdown_description: self.markdown_description.clone(),
            status: self.status.clone(),
            priority: match self.priority {
                Some(Some(p)) => Some(Some(check_priority(p)?)),
                other => other,
            },
            due_date: clearable_date(&self.due_date, "dueDate")?,
            start_date: clearable_date(&self.start_date, "startDate")?,
            time_estimate: self
                .time_estimate
                .as_deref()
                .map(|t| {
                    parse_duration(t)
                        .map(Some)
                        .map_err(|e| ToolError::invalid_params(format!("timeEstimate: {e}")))
                })
                .transpose()?,
            archived: self.archived,
            ..Default::default()
        };
        if request.is_empty() && !self.changes_assignees() {
            return Err(ToolError::invalid_params("No update data provided"));
        }
        Ok(request)
    }

    fn changes_assignees(&self) -> bool {
        self.add_assignees.as_ref().is_some_and(|a| !a.is_empty())
            || self.remove_assignees.as_ref().is_some_and(|a| !a.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[serde(flatten)]
    pub changes: TaskChanges,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskParams {
    #[schemars(description = "Task ID, or a custom task ID. Takes precedence over taskName.")]
    pub task_id: Option<String>,
    #[schemars(description = "Task name, resolved to an ID when taskId is not given")]
    pub task_name: Option<String>,
    #[schemars(description = "Name of the list the task is in, to narrow a taskName lookup")]
    pub source_list_name: Option<String>,
    #[schemars(description = "ID of the destination list")]
    pub list_id: Option<String>,
    #[schemars(description = "Name of the destination list, used when listId is not given")]
    pub list_name: Option<String>,
}

impl MoveTaskParams {
    fn task_ref(&self) -> TaskRef {
        TaskRef {
            task_id: self.task_id.clone(),
            task_name: self.task_name.clone(),
            list_name: self.source_list_name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[schemars(description = "Comment text")]
    pub comment_text: String,
    #[schemars(description = "Notify everyone on the task")]
    pub notify_all: Option<bool>,
    #[schemars(description = "User ID to assign the comment to")]
    pub assignee: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskOnlyParams {
    #[serde(flatten)]
    pub task: TaskRef,
}

// =============================================================================
// Helpers
// =============================================================================

/// Compact view used by list results in summary mode.
pub fn task_summary(task: &Task) -> Value {
    json!({
        "id": task.id,
        "custom_id": task.custom_id,
        "name": task.name,
        "status": task.status.as_ref().map(|s| s.status.as_str()),
        "list": task.list.as_ref().map(|l| json!({"id": l.id, "name": l.name})),
        "due_date": task.due_date,
        "url": task.url,
    })
}

impl ToolContext {
    /// Map user IDs, usernames or emails to numeric user IDs. Members are
    /// only fetched when something is not already numeric.
    pub async fn assignee_ids(&self, assignees: &[String]) -> ToolResult<Vec<i64>> {
        if let Some(ids) = assignees
            .iter()
            .map(|a| a.trim().parse::<i64>().ok())
            .collect::<Option<Vec<_>>>()
        {
            return Ok(ids);
        }
        let members = self.api().members().list().await?;
        assignees
            .iter()
            .map(|query| {
                let member = find_member(&members, query)?;
                member.id.parse::<i64>().map_err(|_| {
                    ToolError::execution(format!("member {} has a non-numeric id", member.id))
                })
            })
            .collect()
    }

    /// Create one task from already validated input.
    pub async fn create_task_in(
        &self,
        list_id: &str,
        mut request: CreateTaskRequest,
        assignees: Option<&[String]>,
    ) -> ToolResult<Task> {
        if let Some(assignees) = assignees.filter(|a| !a.is_empty()) {
            request.assignees = Some(self.assignee_ids(assignees).await?);
        }
        Ok(self.api().tasks().create(list_id, &request).await?)
    }

    /// Apply validated changes to a resolved task.
    pub async fn update_task_with(
        &self,
        task_id: &str,
        mut request: UpdateTaskRequest,
        changes: &TaskChanges,
    ) -> ToolResult<Task> {
        if changes.changes_assignees() {
            let add = match &changes.add_assignees {
                Some(a) if !a.is_empty() => self.assignee_ids(a).await?,
                _ => Vec::new(),
            };
            let rem = match &changes.remove_assignees {
                Some(r) if !r.is_empty() => self.assignee_ids(r).await?,
                _ => Vec::new(),
            };
            request.assignees = Some(AssigneeChanges { add, rem });
        }
        Ok(self.api().tasks().update(task_id, &request).await?)
    }
}

fn duplicate_request(task: &Task) -> CreateTaskRequest {
    let number = |value: &Option<String>| value.as_deref().and_then(|v| v.parse::<i64>().ok());
    CreateTaskRequest {
        name: task.name.clone(),
        description: task.description.clone(),
        status: task.status.as_ref().map(|s| s.status.clone()),
        priority: task
            .priority
            .as_ref()
            .and_then(|p| p.id.as_deref())
            .and_then(|id| id.parse().ok()),
        due_date: number(&task.due_date),
        start_date: number(&task.start_date),
        time_estimate: number(&task.time_estimate),
        tags: (!task.tags.is_empty()).then(|| task.tags.iter().map(|t| t.name.clone()).collect()),
        assignees: {
            let ids: Vec<i64> = task
                .assignees
                .iter()
                .filter_map(|u| u.id.parse().ok())
                .collect();
            (!ids.is_empty()).then_some(ids)
        },
        ..Default::default()
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_task(ctx: ToolContext, params: CreateTaskParams) -> ToolResult<Envelope> {
    non_empty(&params.name, "name")?;
    let list = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let new_task = params.new_task();
    let request = new_task.to_request()?;
    let list_id = ctx.list_id(list, None).await?;
    let task = ctx
        .create_task_in(&list_id, request, new_task.assignees.as_deref())
        .await?;
    Envelope::new(format!("Task '{}' created with id {}", task.name, task.id)).with("task", task)
}

async fn get_task(ctx: ToolContext, params: GetTaskParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let id = params.task.resolve(&ctx).await?;
    let task = ctx
        .api()
        .tasks()
        .get(&id, params.subtasks.unwrap_or(false))
        .await?;
    Envelope::new(format!("Retrieved task '{}' (id {})", task.name, task.id)).with("task", task)
}

async fn get_tasks(ctx: ToolContext, params: GetTasksParams) -> ToolResult<Envelope> {
    let list = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let query = params.filters.to_query()?;
    let list_id = ctx.list_id(list, None).await?;
    let page = ctx.api().tasks().list_in_list(&list_id, &query).await?;
    Envelope::new(format!("Found {} tasks in list {}", page.tasks.len(), list_id))
        .with("count", page.tasks.len())?
        .with("last_page", page.last_page)?
        .with("tasks", page.tasks)
}

async fn update_task(ctx: ToolContext, params: UpdateTaskParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let request = params.changes.to_request()?;
    let id = params.task.resolve(&ctx).await?;
    let task = ctx.update_task_with(&id, request, &params.changes).await?;
    Envelope::new(format!("Task '{}' (id {}) updated", task.name, task.id)).with("task", task)
}

async fn move_task(ctx: ToolContext, params: MoveTaskParams) -> ToolResult<Envelope> {
    let task_ref = params.task_ref();
    task_ref.reference()?;
    let target = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let task_id = task_ref.resolve(&ctx).await?;
    let list_id = ctx.list_id(target, None).await?;
    let task = ctx.api().tasks().move_to_list(&task_id, &list_id).await?;
    Envelope::new(format!("Task '{}' moved to list {}", task.name, list_id)).with("task", task)
}

async fn duplicate_task(ctx: ToolContext, params: MoveTaskParams) -> ToolResult<Envelope> {
    let task_ref = params.task_ref();
    task_ref.reference()?;
    let task_id = task_ref.resolve(&ctx).await?;
    let original = ctx.api().tasks().get(&task_id, false).await?;

    let list_id = match Reference::from_parts(&params.list_id, &params.list_name) {
        Some(target) => ctx.list_id(target, None).await?,
        None => original
            .list
            .as_ref()
            .map(|l| l.id.clone())
            .ok_or_else(|| {
                ToolError::invalid_params(
                    "The task has no list; provide listId or listName for the copy",
                )
            })?,
    };
    let copy = ctx
        .api()
        .tasks()
        .create(&list_id, &duplicate_request(&original))
        .await?;
    Envelope::new(format!(
        "Task '{}' duplicated as {} in list {}",
        original.name, copy.id, list_id
    ))
    .with("originalTaskId", &original.id)?
    .with("task", copy)
}

async fn delete_task(ctx: ToolContext, params: TaskOnlyParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let id = params.task.resolve(&ctx).await?;
    ctx.api().tasks().delete(&id).await?;
    Envelope::new(format!("Task {id} deleted")).with("taskId", id)
}

async fn get_task_comments(ctx: ToolContext, params: TaskOnlyParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let id = params.task.resolve(&ctx).await?;
    let comments = ctx.api().tasks().comments(&id).await?;
    Envelope::new(format!("Found {} comments on task {}", comments.len(), id))
        .with("count", comments.len())?
        .with("comments", comments)
}

async fn create_task_comment(ctx: ToolContext, params: CreateCommentParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let text = non_empty(&params.comment_text, "commentText")?;
    let request = CreateCommentRequest {
        comment_text: text.to_string(),
        assignee: params.assignee,
        notify_all: params.notify_all.unwrap_or(false),
    };
    let id = params.task.resolve(&ctx).await?;
    let comment = ctx.api().tasks().add_comment(&id, &request).await?;
    Envelope::new(format!("Comment {} added to task {}", comment.id, id)).with("comment", comment)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Task,
        "create_task",
        "Create a task in a list given by listId or listName. Dates accept Unix milliseconds, YYYY-MM-DD or phrases like 'tomorrow'.",
        create_task,
    );
    registry.register(
        ToolFamily::Task,
        "get_task",
        "Get a task by taskId (or custom ID like DEV-42) or by taskName, optionally narrowed with listName.",
        get_task,
    );
    registry.register(
        ToolFamily::Task,
        "get_tasks",
        "List tasks in one list with optional filters (statuses, assignees, tags, dates, closed and archived tasks).",
        get_tasks,
    );
    registry.register(
        ToolFamily::Task,
        "update_task",
        "Update a task. Only the fields given are changed; pass null for priority, dueDate or startDate to clear them.",
        update_task,
    );
    registry.register(
        ToolFamily::Task,
        "move_task",
        "Move a task to another list (listId or listName).",
        move_task,
    );
    registry.register(
        ToolFamily::Task,
        "duplicate_task",
        "Copy a task, into listId/listName when given or else into its own list.",
        duplicate_task,
    );
    registry.register(
        ToolFamily::Task,
        "delete_task",
        "Permanently delete a task.",
        delete_task,
    );
    registry.register(
        ToolFamily::Task,
        "get_task_comments",
        "List the comments on a task.",
        get_task_comments,
    );
    registry.register(
        ToolFamily::Task,
        "create_task_comment",
        "Add a comment to a task.",
        create_task_comment,
    );
}
