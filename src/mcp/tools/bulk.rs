//! Bulk task tools.
//!
//! Items run one after another and each reports its own outcome. A failing
//! item never undoes earlier ones; with `continueOnError: false` the rest are
//! reported as skipped.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::tasks::{NewTask, TaskChanges, TaskRef};
use crate::mcp::tools::{Reference, ToolContext};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkOptions {
    #[schemars(description = "Keep going after a failed item (default: true)")]
    pub continue_on_error: Option<bool>,
}

fn continue_on_error(options: &Option<BulkOptions>) -> bool {
    options
        .as_ref()
        .and_then(|o| o.continue_on_error)
        .unwrap_or(true)
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBulkTasksParams {
    #[schemars(description = "ID of the list to create the tasks in")]
    pub list_id: Option<String>,
    #[schemars(description = "Name of the list, used when listId is not given")]
    pub list_name: Option<String>,
    #[schemars(description = "Tasks to create; each needs a name")]
    pub tasks: Vec<NewTask>,
    pub options: Option<BulkOptions>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkUpdateItem {
    #[serde(flatten)]
    pub task: TaskRef,
    #[serde(flatten)]
    pub changes: TaskChanges,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateBulkTasksParams {
    #[schemars(description = "Tasks to update, each with taskId or taskName and the fields to change")]
    pub tasks: Vec<BulkUpdateItem>,
    pub options: Option<BulkOptions>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveBulkTasksParams {
    #[schemars(description = "Tasks to move, each with taskId or taskName")]
    pub tasks: Vec<TaskRef>,
    #[schemars(description = "ID of the destination list")]
    pub target_list_id: Option<String>,
    #[schemars(description = "Name of the destination list, used when targetListId is not given")]
    pub target_list_name: Option<String>,
    pub options: Option<BulkOptions>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteBulkTasksParams {
    #[schemars(description = "Tasks to delete, each with taskId or taskName")]
    pub tasks: Vec<TaskRef>,
    pub options: Option<BulkOptions>,
}

// =============================================================================
// Report
// =============================================================================

/// Per-item outcomes of one bulk call.
struct BulkReport {
    continue_on_error: bool,
    results: Vec<Value>,
    succeeded: usize,
    failed: usize,
}

impl BulkReport {
    fn new(total: usize, continue_on_error: bool) -> Self {
        Self {
            continue_on_error,
            results: Vec::with_capacity(total),
            succeeded: 0,
            failed: 0,
        }
    }

    fn halted(&self) -> bool {
        !self.continue_on_error && self.failed > 0
    }

    fn record(&mut self, index: usize, key: &str, outcome: ToolResult<Value>) {
        match outcome {
            Ok(value) => {
                self.succeeded += 1;
                self.results
                    .push(json!({"index": index, "success": true, key: value}));
            }
            Err(e) => {
                warn!(index, error = %e, "bulk item failed");
                self.failed += 1;
                self.results
                    .push(json!({"index": index, "success": false, "error": e.to_string()}));
            }
        }
    }

    fn skip(&mut self, index: usize) {
        self.results
            .push(json!({"index": index, "success": false, "skipped": true}));
    }

    fn into_envelope(self, verb: &str) -> ToolResult<Envelope> {
        let total = self.results.len();
        let skipped = total - self.succeeded - self.failed;
        let mut message = format!("{verb} {} of {total} tasks", self.succeeded);
        if self.failed > 0 {
            message.push_str(&format!(", {} failed", self.failed));
        }
        if skipped > 0 {
            message.push_str(&format!(", {skipped} skipped"));
        }
        let envelope = Envelope::new(message)
            .with("total", total)?
            .with("succeeded", self.succeeded)?
            .with("failed", self.failed)?
            .with("results", self.results)?;
        Ok(if self.failed > 0 {
            envelope.partial()
        } else {
            envelope
        })
    }
}

fn require_items<T>(items: &[T]) -> ToolResult<()> {
    if items.is_empty() {
        Err(ToolError::invalid_params("tasks must contain at least one item"))
    } else {
        Ok(())
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_one(ctx: &ToolContext, list_id: &str, item: &NewTask) -> ToolResult<Value> {
    let request = item.to_request()?;
    let task = ctx
        .create_task_in(list_id, request, item.assignees.as_deref())
        .await?;
    Ok(serde_json::to_value(task)?)
}

async fn create_bulk_tasks(ctx: ToolContext, params: CreateBulkTasksParams) -> ToolResult<Envelope> {
    require_items(&params.tasks)?;
    let list = Reference::require(&params.list_id, &params.list_name, "listId", "listName")?;
    let list_id = ctx.list_id(list, None).await?;

    let mut report = BulkReport::new(params.tasks.len(), continue_on_error(&params.options));
    for (index, item) in params.tasks.iter().enumerate() {
        if report.halted() {
            report.skip(index);
            continue;
        }
        let outcome = create_one(&ctx, &list_id, item).await;
        report.record(index, "task", outcome);
    }
    report.into_envelope("Created")
}

async fn update_one(ctx: &ToolContext, item: &BulkUpdateItem) -> ToolResult<Value> {
    item.task.reference()?;
    let request = item.changes.to_request()?;
    let id = item.task.resolve(ctx).await?;
    let task = ctx.update_task_with(&id, request, &item.changes).await?;
    Ok(serde_json::to_value(task)?)
}

async fn update_bulk_tasks(ctx: ToolContext, params: UpdateBulkTasksParams) -> ToolResult<Envelope> {
    require_items(&params.tasks)?;
    let mut report = BulkReport::new(params.tasks.len(), continue_on_error(&params.options));
    for (index, item) in params.tasks.iter().enumerate() {
        if report.halted() {
            report.skip(index);
            continue;
        }
        let outcome = update_one(&ctx, item).await;
        report.record(index, "task", outcome);
    }
    report.into_envelope("Updated")
}

async fn move_one(ctx: &ToolContext, list_id: &str, item: &TaskRef) -> ToolResult<Value> {
    item.reference()?;
    let id = item.resolve(ctx).await?;
    let task = ctx.api().tasks().move_to_list(&id, list_id).await?;
    Ok(serde_json::to_value(task)?)
}

async fn move_bulk_tasks(ctx: ToolContext, params: MoveBulkTasksParams) -> ToolResult<Envelope> {
    require_items(&params.tasks)?;
    let target = Reference::require(
        &params.target_list_id,
        &params.target_list_name,
        "targetListId",
        "targetListName",
    )?;
    let list_id = ctx.list_id(target, None).await?;

    let mut report = BulkReport::new(params.tasks.len(), continue_on_error(&params.options));
    for (index, item) in params.tasks.iter().enumerate() {
        if report.halted() {
            report.skip(index);
            continue;
        }
        let outcome = move_one(&ctx, &list_id, item).await;
        report.record(index, "task", outcome);
    }
    report.into_envelope("Moved")
}

async fn delete_one(ctx: &ToolContext, item: &TaskRef) -> ToolResult<Value> {
    item.reference()?;
    let id = item.resolve(ctx).await?;
    ctx.api().tasks().delete(&id).await?;
    Ok(Value::String(id))
}

async fn delete_bulk_tasks(ctx: ToolContext, params: DeleteBulkTasksParams) -> ToolResult<Envelope> {
    require_items(&params.tasks)?;
    let mut report = BulkReport::new(params.tasks.len(), continue_on_error(&params.options));
    for (index, item) in params.tasks.iter().enumerate() {
        if report.halted() {
            report.skip(index);
            continue;
        }
        let outcome = delete_one(&ctx, item).await;
        report.record(index, "taskId", outcome);
    }
    report.into_envelope("Deleted")
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Bulk,
        "create_bulk_tasks",
        "Create several tasks in one list. Each item is created independently and reported with its index; failed items do not undo the others.",
        create_bulk_tasks,
    );
    registry.register(
        ToolFamily::Bulk,
        "update_bulk_tasks",
        "Update several tasks, each given by taskId or taskName with the fields to change.",
        update_bulk_tasks,
    );
    registry.register(
        ToolFamily::Bulk,
        "move_bulk_tasks",
        "Move several tasks to the list given by targetListId or targetListName.",
        move_bulk_tasks,
    );
    registry.register(
        ToolFamily::Bulk,
        "delete_bulk_tasks",
        "Permanently delete several tasks.",
        delete_bulk_tasks,
    );
}
