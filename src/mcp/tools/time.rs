//! Time tracking tools.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::clickup::models::{CreateTimeEntryRequest, StartTimerRequest, TagName, TimeEntryQuery};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::tasks::TaskRef;
use crate::mcp::tools::{DateInput, NoParams, ToolContext, non_empty, parse_duration};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntriesParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[schemars(description = "Only entries starting after this date")]
    pub start_date: Option<DateInput>,
    #[schemars(description = "Only entries starting before this date")]
    pub end_date: Option<DateInput>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[schemars(description = "What is being worked on")]
    pub description: Option<String>,
    #[schemars(description = "Mark the time as billable")]
    pub billable: Option<bool>,
    #[schemars(description = "Time entry tag names")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTimeEntryParams {
    #[serde(flatten)]
    pub task: TaskRef,
    #[schemars(description = "When the work started: Unix milliseconds, YYYY-MM-DD HH:MM, or phrases like '2 hours ago'")]
    pub start: DateInput,
    #[schemars(description = "How long: '1h 30m', '90m', '2h' or a number of minutes")]
    pub duration: String,
    #[schemars(description = "What was worked on")]
    pub description: Option<String>,
    #[schemars(description = "Mark the time as billable")]
    pub billable: Option<bool>,
    #[schemars(description = "Time entry tag names")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTimeEntryParams {
    #[schemars(description = "ID of the time entry to delete")]
    pub time_entry_id: String,
}

fn tag_names(tags: &Option<Vec<String>>) -> Option<Vec<TagName>> {
    tags.as_ref().map(|tags| {
        tags.iter()
            .map(|name| TagName { name: name.clone() })
            .collect()
    })
}

async fn get_task_time_entries(
    ctx: ToolContext,
    params: TimeEntriesParams,
) -> ToolResult<Envelope> {
    params.task.reference()?;
    let start_date = params
        .start_date
        .as_ref()
        .map(|d| d.to_millis("startDate"))
        .transpose()?;
    let end_date = params
        .end_date
        .as_ref()
        .map(|d| d.to_millis("endDate"))
        .transpose()?;
    let task_id = params.task.resolve(&ctx).await?;

    let query = TimeEntryQuery {
        task_id: Some(task_id.clone()),
        start_date,
        end_date,
    };
    let entries = ctx.api().time().entries(&query).await?;
    let total: i64 = entries
        .iter()
        .filter_map(|e| e.duration.as_deref()?.parse::<i64>().ok())
        .filter(|d| *d > 0)
        .sum();
    Envelope::new(format!(
        "Found {} time entries on task {}",
        entries.len(),
        task_id
    ))
    .with("count", entries.len())?
    .with("totalDurationMs", total)?
    .with("timeEntries", entries)
}

async fn start_time_tracking(ctx: ToolContext, params: StartTimerParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let task_id = params.task.resolve(&ctx).await?;
    let request = StartTimerRequest {
        tid: task_id.clone(),
        description: params.description.clone(),
        billable: params.billable,
        tags: tag_names(&params.tags),
    };
    let entry = ctx.api().time().start(&request).await?;
    Envelope::new(format!("Timer started on task {task_id}")).with("timeEntry", entry)
}

async fn stop_time_tracking(ctx: ToolContext, _params: NoParams) -> ToolResult<Envelope> {
    let entry = ctx.api().time().stop().await?;
    Envelope::new(format!("Timer stopped (entry {})", entry.id)).with("timeEntry", entry)
}

async fn add_time_entry(ctx: ToolContext, params: AddTimeEntryParams) -> ToolResult<Envelope> {
    params.task.reference()?;
    let start = params.start.to_millis("start")?;
    let duration = parse_duration(non_empty(&params.duration, "duration")?)
        .map_err(|e| ToolError::invalid_params(format!("duration: {e}")))?;
    let task_id = params.task.resolve(&ctx).await?;

    let request = CreateTimeEntryRequest {
        tid: task_id.clone(),
        start,
        duration,
        description: params.description.clone(),
        billable: params.billable,
        tags: tag_names(&params.tags),
    };
    let entry = ctx.api().time().create(&request).await?;
    Envelope::new(format!(
        "Added {} minutes to task {}",
        duration / 60_000,
        task_id
    ))
    .with("timeEntry", entry)
}

async fn delete_time_entry(ctx: ToolContext, params: DeleteTimeEntryParams) -> ToolResult<Envelope> {
    let id = non_empty(&params.time_entry_id, "timeEntryId")?;
    ctx.api().time().delete(id).await?;
    Envelope::new(format!("Time entry {id} deleted")).with("timeEntryId", id)
}

async fn get_current_time_entry(ctx: ToolContext, _params: NoParams) -> ToolResult<Envelope> {
    match ctx.api().time().current().await? {
        Some(entry) => {
            Envelope::new(format!("Timer running (entry {})", entry.id)).with("timeEntry", entry)
        }
        None => Envelope::new("No timer is running").with("timeEntry", None::<()>),
    }
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Time,
        "get_task_time_entries",
        "List time entries recorded on a task, optionally between startDate and endDate.",
        get_task_time_entries,
    );
    registry.register(
        ToolFamily::Time,
        "start_time_tracking",
        "Start a timer on a task.",
        start_time_tracking,
    );
    registry.register(
        ToolFamily::Time,
        "stop_time_tracking",
        "Stop the running timer.",
        stop_time_tracking,
    );
    registry.register(
        ToolFamily::Time,
        "add_time_entry",
        "Record time already spent on a task, from a start time and a duration such as '1h 30m'.",
        add_time_entry,
    );
    registry.register(
        ToolFamily::Time,
        "delete_time_entry",
        "Delete a time entry.",
        delete_time_entry,
    );
    registry.register(
        ToolFamily::Time,
        "get_current_time_entry",
        "Show the running timer, if any.",
        get_current_time_entry,
    );
}
