//! In-memory ClickUp backend for tests.
//!
//! Behaves like a tiny ClickUp workspace and records every trait call by
//! name (`"spaces.list"`, `"tasks.create"`, ...) so tests can assert which
//! backend round-trips a tool made. Seeding helpers do not record calls.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::clickup::{
    ClickUpError, ClickUpResult,
    api::{ClickUpApi, DocApi, FolderApi, ListApi, MemberApi, SpaceApi, TagApi, TaskApi, TimeApi},
    models::{
        Comment, CreateCommentRequest, CreateDocRequest, CreateListRequest, CreatePageRequest,
        CreateSpaceRequest, CreateTagRequest, CreateTaskRequest, CreateTimeEntryRequest, Doc,
        DocList, DocPage, DocSearchQuery, Folder, FolderRequest, List, ResourceRef, Space,
        StartTimerRequest, Tag, Task, TaskPage, TaskPriority, TaskQuery, TaskStatus, TimeEntry,
        TimeEntryQuery, TimeEntryTask, UpdateListRequest, UpdatePageRequest, UpdateSpaceRequest,
        UpdateTagRequest, UpdateTaskRequest, User,
    },
};

pub const TEST_WORKSPACE_ID: &str = "9000";

#[derive(Default)]
struct State {
    next_id: u64,
    members: Vec<User>,
    spaces: Vec<Space>,
    folders: Vec<Folder>,
    lists: Vec<List>,
    tasks: Vec<Task>,
    comments: HashMap<String, Vec<Comment>>,
    tags: HashMap<String, Vec<Tag>>,
    time_entries: Vec<TimeEntry>,
    running: Option<TimeEntry>,
    docs: Vec<Doc>,
    pages: HashMap<String, Vec<DocPage>>,
    last_task_query: Option<TaskQuery>,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("{}", 100 + self.next_id)
    }

    fn task_mut(&mut self, id: &str) -> ClickUpResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id || t.custom_id.as_deref() == Some(id))
            .ok_or_else(|| missing("Task"))
    }
}

fn missing(entity: &str) -> ClickUpError {
    ClickUpError::Api {
        status: 404,
        code: Some("ITEM_015".to_string()),
        message: format!("{entity} not found"),
    }
}

fn priority_label(priority: u8) -> TaskPriority {
    let label = match priority {
        1 => "urgent",
        2 => "high",
        3 => "normal",
        _ => "low",
    };
    TaskPriority {
        id: Some(priority.to_string()),
        priority: label.to_string(),
        color: None,
    }
}

/// Call-recording in-memory backend.
pub struct InMemoryClickUp {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

impl Default for InMemoryClickUp {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClickUp {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: &str) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.to_string());
    }

    /// Every recorded call in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// The most recent filter set passed to a task listing call.
    pub fn last_task_query(&self) -> Option<TaskQuery> {
        self.state().last_task_query.clone()
    }

    // Seeding helpers

    pub fn add_member(&self, id: i64, username: &str, email: &str) -> User {
        let user = User {
            id: id.to_string(),
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            initials: None,
            color: None,
        };
        self.state().members.push(user.clone());
        user
    }

    pub fn add_space(&self, name: &str) -> Space {
        let mut state = self.state();
        let space = Space {
            id: state.next_id(),
            name: name.to_string(),
            private: Some(false),
            color: None,
            archived: Some(false),
            multiple_assignees: Some(false),
            statuses: Vec::new(),
            features: None,
        };
        state.spaces.push(space.clone());
        space
    }

    pub fn add_folder(&self, space_id: &str, name: &str) -> Folder {
        let mut state = self.state();
        let folder = Folder {
            id: state.next_id(),
            name: name.to_string(),
            hidden: Some(false),
            archived: Some(false),
            space: Some(ResourceRef::new(space_id, None)),
            task_count: None,
            lists: Vec::new(),
        };
        state.folders.push(folder.clone());
        folder
    }

    pub fn add_list(&self, space_id: &str, folder_id: Option<&str>, name: &str) -> List {
        let mut state = self.state();
        let list = List {
            id: state.next_id(),
            name: name.to_string(),
            content: None,
            status: None,
            priority: None,
            due_date: None,
            folder: folder_id.map(|f| ResourceRef::new(f, None)),
            space: Some(ResourceRef::new(space_id, None)),
            task_count: None,
            archived: Some(false),
        };
        state.lists.push(list.clone());
        list
    }

    pub fn add_task(&self, list_id: &str, name: &str) -> Task {
        let mut state = self.state();
        let id = state.next_id();
        let list = state.lists.iter().find(|l| l.id == list_id).cloned();
        let task = Task {
            id: id.clone(),
            custom_id: None,
            name: name.to_string(),
            description: None,
            text_content: None,
            status: Some(TaskStatus {
                status: "to do".to_string(),
                color: None,
                kind: Some("open".to_string()),
            }),
            priority: None,
            date_created: Some("1700000000000".to_string()),
            date_updated: None,
            due_date: None,
            start_date: None,
            time_estimate: None,
            parent: None,
            url: Some(format!("https://app.clickup.com/t/{id}")),
            list: Some(ResourceRef::new(
                list_id,
                list.as_ref().map(|l| l.name.clone()),
            )),
            folder: list.as_ref().and_then(|l| l.folder.clone()),
            space: list.as_ref().and_then(|l| l.space.clone()),
            tags: Vec::new(),
            assignees: Vec::new(),
            subtasks: Vec::new(),
        };
        state.tasks.push(task.clone());
        task
    }

    pub fn set_custom_id(&self, task_id: &str, custom_id: &str) {
        if let Ok(task) = self.state().task_mut(task_id) {
            task.custom_id = Some(custom_id.to_string());
        }
    }

    pub fn add_space_tag(&self, space_id: &str, name: &str) {
        self.state()
            .tags
            .entry(space_id.to_string())
            .or_default()
            .push(Tag {
                name: name.to_string(),
                tag_fg: None,
                tag_bg: None,
            });
    }

    pub fn add_doc(&self, name: &str) -> Doc {
        let mut state = self.state();
        let doc = Doc {
            id: state.next_id(),
            name: name.to_string(),
            date_created: Some(1_700_000_000_000),
            date_updated: None,
            parent: None,
            workspace_id: Some(TEST_WORKSPACE_ID.to_string()),
            creator: None,
            deleted: Some(false),
            archived: Some(false),
        };
        state.docs.push(doc.clone());
        doc
    }

    pub fn add_page(&self, doc_id: &str, name: &str, content: &str) -> DocPage {
        let mut state = self.state();
        let page = DocPage {
            id: state.next_id(),
            doc_id: Some(doc_id.to_string()),
            name: Some(name.to_string()),
            sub_title: None,
            content: Some(content.to_string()),
            parent_page_id: None,
            date_created: None,
            date_updated: None,
            pages: Vec::new(),
        };
        state
            .pages
            .entry(doc_id.to_string())
            .or_default()
            .push(page.clone());
        page
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.state().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn space(&self, id: &str) -> Option<Space> {
        self.state().spaces.iter().find(|s| s.id == id).cloned()
    }

    pub fn list(&self, id: &str) -> Option<List> {
        self.state().lists.iter().find(|l| l.id == id).cloned()
    }

    pub fn space_tags(&self, space_id: &str) -> Vec<Tag> {
        self.state().tags.get(space_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl MemberApi for InMemoryClickUp {
    async fn list(&self) -> ClickUpResult<Vec<User>> {
        self.record("members.list");
        Ok(self.state().members.clone())
    }
}

#[async_trait]
impl SpaceApi for InMemoryClickUp {
    async fn list(&self, archived: bool) -> ClickUpResult<Vec<Space>> {
        self.record("spaces.list");
        Ok(self
            .state()
            .spaces
            .iter()
            .filter(|s| archived || s.archived != Some(true))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> ClickUpResult<Space> {
        self.record("spaces.get");
        self.space(id).ok_or_else(|| missing("Space"))
    }

    async fn create(&self, request: &CreateSpaceRequest) -> ClickUpResult<Space> {
        self.record("spaces.create");
        let mut state = self.state();
        let space = Space {
            id: state.next_id(),
            name: request.name.clone(),
            private: Some(false),
            color: None,
            archived: Some(false),
            multiple_assignees: request.multiple_assignees,
            statuses: Vec::new(),
            features: request.features.clone(),
        };
        state.spaces.push(space.clone());
        Ok(space)
    }

    async fn update(&self, id: &str, request: &UpdateSpaceRequest) -> ClickUpResult<Space> {
        self.record("spaces.update");
        let mut state = self.state();
        let space = state
            .spaces
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| missing("Space"))?;
        if let Some(name) = &request.name {
            space.name = name.clone();
        }
        if let Some(color) = &request.color {
            space.color = Some(color.clone());
        }
        if let Some(private) = request.private {
            space.private = Some(private);
        }
        if let Some(multiple) = request.multiple_assignees {
            space.multiple_assignees = Some(multiple);
        }
        if let Some(features) = &request.features {
            space.features = Some(features.clone());
        }
        Ok(space.clone())
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        self.record("spaces.delete");
        let mut state = self.state();
        let before = state.spaces.len();
        state.spaces.retain(|s| s.id != id);
        if state.spaces.len() == before {
            return Err(missing("Space"));
        }
        Ok(())
    }
}

#[async_trait]
impl FolderApi for InMemoryClickUp {
    async fn list(&self, space_id: &str) -> ClickUpResult<Vec<Folder>> {
        self.record("folders.list");
        let state = self.state();
        Ok(state
            .folders
            .iter()
            .filter(|f| f.space.as_ref().is_some_and(|s| s.id == space_id))
            .map(|f| {
                let mut folder = f.clone();
                folder.lists = state
                    .lists
                    .iter()
                    .filter(|l| l.folder.as_ref().is_some_and(|lf| lf.id == f.id))
                    .cloned()
                    .collect();
                folder
            })
            .collect())
    }

    async fn get(&self, id: &str) -> ClickUpResult<Folder> {
        self.record("folders.get");
        self.state()
            .folders
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| missing("Folder"))
    }

    async fn create(&self, space_id: &str, request: &FolderRequest) -> ClickUpResult<Folder> {
        self.record("folders.create");
        if self.space(space_id).is_none() {
            return Err(missing("Space"));
        }
        let mut state = self.state();
        let folder = Folder {
            id: state.next_id(),
            name: request.name.clone(),
            hidden: Some(false),
            archived: Some(false),
            space: Some(ResourceRef::new(space_id, None)),
            task_count: Some("0".to_string()),
            lists: Vec::new(),
        };
        state.folders.push(folder.clone());
        Ok(folder)
    }

    async fn update(&self, id: &str, request: &FolderRequest) -> ClickUpResult<Folder> {
        self.record("folders.update");
        let mut state = self.state();
        let folder = state
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| missing("Folder"))?;
        folder.name = request.name.clone();
        Ok(folder.clone())
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        self.record("folders.delete");
        let mut state = self.state();
        let before = state.folders.len();
        state.folders.retain(|f| f.id != id);
        if state.folders.len() == before {
            return Err(missing("Folder"));
        }
        Ok(())
    }
}

#[async_trait]
impl ListApi for InMemoryClickUp {
    async fn list_in_folder(&self, folder_id: &str) -> ClickUpResult<Vec<List>> {
        self.record("lists.list_in_folder");
        Ok(self
            .state()
            .lists
            .iter()
            .filter(|l| l.folder.as_ref().is_some_and(|f| f.id == folder_id))
            .cloned()
            .collect())
    }

    async fn list_folderless(&self, space_id: &str) -> ClickUpResult<Vec<List>> {
        self.record("lists.list_folderless");
        Ok(self
            .state()
            .lists
            .iter()
            .filter(|l| l.folder.is_none() && l.space.as_ref().is_some_and(|s| s.id == space_id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> ClickUpResult<List> {
        self.record("lists.get");
        self.list(id).ok_or_else(|| missing("List"))
    }

    async fn create_in_space(
        &self,
        space_id: &str,
        request: &CreateListRequest,
    ) -> ClickUpResult<List> {
        self.record("lists.create_in_space");
        if self.space(space_id).is_none() {
            return Err(missing("Space"));
        }
        let list = self.add_list(space_id, None, &request.name);
        self.apply_list_fields(&list.id, request)
    }

    async fn create_in_folder(
        &self,
        folder_id: &str,
        request: &CreateListRequest,
    ) -> ClickUpResult<List> {
        self.record("lists.create_in_folder");
        let space_id = self
            .state()
            .folders
            .iter()
            .find(|f| f.id == folder_id)
            .and_then(|f| f.space.as_ref().map(|s| s.id.clone()))
            .ok_or_else(|| missing("Folder"))?;
        let list = self.add_list(&space_id, Some(folder_id), &request.name);
        self.apply_list_fields(&list.id, request)
    }

    async fn update(&self, id: &str, request: &UpdateListRequest) -> ClickUpResult<List> {
        self.record("lists.update");
        let mut state = self.state();
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| missing("List"))?;
        if let Some(name) = &request.name {
            list.name = name.clone();
        }
        if let Some(content) = &request.content {
            list.content = Some(content.clone());
        }
        if let Some(due) = request.due_date {
            list.due_date = due.map(|d| d.to_string());
        }
        if let Some(priority) = request.priority {
            list.priority = priority.map(|p| serde_json::json!({ "priority": p }));
        }
        if let Some(status) = &request.status {
            list.status = Some(serde_json::json!({ "status": status }));
        }
        Ok(list.clone())
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        self.record("lists.delete");
        let mut state = self.state();
        let before = state.lists.len();
        state.lists.retain(|l| l.id != id);
        if state.lists.len() == before {
            return Err(missing("List"));
        }
        Ok(())
    }
}

impl InMemoryClickUp {
    fn apply_list_fields(&self, id: &str, request: &CreateListRequest) -> ClickUpResult<List> {
        let mut state = self.state();
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| missing("List"))?;
        list.content = request.content.clone();
        list.due_date = request.due_date.map(|d| d.to_string());
        list.priority = request
            .priority
            .map(|p| serde_json::json!({ "priority": p }));
        list.status = request
            .status
            .as_ref()
            .map(|s| serde_json::json!({ "status": s }));
        Ok(list.clone())
    }
}

#[async_trait]
impl TaskApi for InMemoryClickUp {
    async fn get(&self, id: &str, include_subtasks: bool) -> ClickUpResult<Task> {
        self.record("tasks.get");
        let state = self.state();
        let mut task = state
            .tasks
            .iter()
            .find(|t| t.id == id || t.custom_id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| missing("Task"))?;
        if include_subtasks {
            task.subtasks = state
                .tasks
                .iter()
                .filter(|t| t.parent.as_deref() == Some(task.id.as_str()))
                .cloned()
                .collect();
        }
        Ok(task)
    }

    async fn list_in_list(&self, list_id: &str, query: &TaskQuery) -> ClickUpResult<TaskPage> {
        self.record("tasks.list_in_list");
        let mut state = self.state();
        state.last_task_query = Some(query.clone());
        if !state.lists.iter().any(|l| l.id == list_id) {
            return Err(missing("List"));
        }
        if query.page.unwrap_or(0) > 0 {
            return Ok(TaskPage {
                tasks: Vec::new(),
                last_page: Some(true),
            });
        }
        let tasks = state
            .tasks
            .iter()
            .filter(|t| t.list.as_ref().is_some_and(|l| l.id == list_id))
            .cloned()
            .collect();
        Ok(TaskPage {
            tasks,
            last_page: Some(true),
        })
    }

    async fn search(&self, query: &TaskQuery) -> ClickUpResult<TaskPage> {
        self.record("tasks.search");
        let mut state = self.state();
        state.last_task_query = Some(query.clone());
        if query.page.unwrap_or(0) > 0 {
            return Ok(TaskPage {
                tasks: Vec::new(),
                last_page: Some(true),
            });
        }
        let tasks = state
            .tasks
            .iter()
            .filter(|t| {
                query.list_ids.is_empty()
                    || t.list
                        .as_ref()
                        .is_some_and(|l| query.list_ids.contains(&l.id))
            })
            .cloned()
            .collect();
        Ok(TaskPage {
            tasks,
            last_page: Some(true),
        })
    }

    async fn create(&self, list_id: &str, request: &CreateTaskRequest) -> ClickUpResult<Task> {
        self.record("tasks.create");
        if self.list(list_id).is_none() {
            return Err(missing("List"));
        }
        let task = self.add_task(list_id, &request.name);
        let mut state = self.state();
        let members = state.members.clone();
        let stored = state.task_mut(&task.id)?;
        stored.description = request
            .description
            .clone()
            .or_else(|| request.markdown_description.clone());
        if let Some(status) = &request.status {
            stored.status = Some(TaskStatus {
                status: status.clone(),
                color: None,
                kind: None,
            });
        }
        stored.priority = request.priority.map(priority_label);
        stored.due_date = request.due_date.map(|d| d.to_string());
        stored.start_date = request.start_date.map(|d| d.to_string());
        stored.time_estimate = request.time_estimate.map(|d| d.to_string());
        stored.parent = request.parent.clone();
        stored.tags = request
            .tags
            .iter()
            .flatten()
            .map(|name| Tag {
                name: name.clone(),
                tag_fg: None,
                tag_bg: None,
            })
            .collect();
        stored.assignees = request
            .assignees
            .iter()
            .flatten()
            .map(|id| {
                members
                    .iter()
                    .find(|m| m.id == id.to_string())
                    .cloned()
                    .unwrap_or(User {
                        id: id.to_string(),
                        username: None,
                        email: None,
                        initials: None,
                        color: None,
                    })
            })
            .collect();
        Ok(stored.clone())
    }

    async fn update(&self, id: &str, request: &UpdateTaskRequest) -> ClickUpResult<Task> {
        self.record("tasks.update");
        let mut state = self.state();
        let task = state.task_mut(id)?;
        if let Some(name) = &request.name {
            task.name = name.clone();
        }
        if let Some(description) = request
            .description
            .as_ref()
            .or(request.markdown_description.as_ref())
        {
            task.description = Some(description.clone());
        }
        if let Some(status) = &request.status {
            task.status = Some(TaskStatus {
                status: status.clone(),
                color: None,
                kind: None,
            });
        }
        if let Some(priority) = request.priority {
            task.priority = priority.map(priority_label);
        }
        if let Some(due) = request.due_date {
            task.due_date = due.map(|d| d.to_string());
        }
        if let Some(start) = request.start_date {
            task.start_date = start.map(|d| d.to_string());
        }
        if let Some(estimate) = request.time_estimate {
            task.time_estimate = estimate.map(|d| d.to_string());
        }
        if let Some(changes) = &request.assignees {
            task.assignees
                .retain(|u| !changes.rem.iter().any(|r| r.to_string() == u.id));
            for add in &changes.add {
                task.assignees.push(User {
                    id: add.to_string(),
                    username: None,
                    email: None,
                    initials: None,
                    color: None,
                });
            }
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        self.record("tasks.delete");
        let mut state = self.state();
        let before = state.tasks.len();
        state
            .tasks
            .retain(|t| t.id != id && t.custom_id.as_deref() != Some(id));
        if state.tasks.len() == before {
            return Err(missing("Task"));
        }
        Ok(())
    }

    async fn move_to_list(&self, id: &str, list_id: &str) -> ClickUpResult<Task> {
        self.record("tasks.move_to_list");
        let list = self.list(list_id).ok_or_else(|| missing("List"))?;
        let mut state = self.state();
        let task = state.task_mut(id)?;
        task.list = Some(ResourceRef::new(list.id.clone(), Some(list.name.clone())));
        task.folder = list.folder.clone();
        task.space = list.space.clone();
        Ok(task.clone())
    }

    async fn comments(&self, id: &str) -> ClickUpResult<Vec<Comment>> {
        self.record("tasks.comments");
        let mut state = self.state();
        let task_id = state.task_mut(id)?.id.clone();
        Ok(state.comments.get(&task_id).cloned().unwrap_or_default())
    }

    async fn add_comment(
        &self,
        id: &str,
        request: &CreateCommentRequest,
    ) -> ClickUpResult<Comment> {
        self.record("tasks.add_comment");
        let mut state = self.state();
        let task_id = state.task_mut(id)?.id.clone();
        let comment = Comment {
            id: state.next_id(),
            comment_text: Some(request.comment_text.clone()),
            user: None,
            date: Some("1700000000000".to_string()),
            resolved: Some(false),
        };
        state
            .comments
            .entry(task_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl TagApi for InMemoryClickUp {
    async fn list(&self, space_id: &str) -> ClickUpResult<Vec<Tag>> {
        self.record("tags.list");
        if self.space(space_id).is_none() {
            return Err(missing("Space"));
        }
        Ok(self.space_tags(space_id))
    }

    async fn create(&self, space_id: &str, request: &CreateTagRequest) -> ClickUpResult<Tag> {
        self.record("tags.create");
        if self.space(space_id).is_none() {
            return Err(missing("Space"));
        }
        let mut state = self.state();
        let tags = state.tags.entry(space_id.to_string()).or_default();
        if tags.iter().any(|t| t.name == request.name) {
            return Err(ClickUpError::Api {
                status: 400,
                code: Some("TAG_001".to_string()),
                message: "Tag already exists".to_string(),
            });
        }
        let tag = Tag {
            name: request.name.clone(),
            tag_fg: request.tag_fg.clone(),
            tag_bg: request.tag_bg.clone(),
        };
        tags.push(tag.clone());
        Ok(tag)
    }

    async fn update(
        &self,
        space_id: &str,
        tag_name: &str,
        request: &UpdateTagRequest,
    ) -> ClickUpResult<Tag> {
        self.record("tags.update");
        let mut state = self.state();
        let tag = state
            .tags
            .get_mut(space_id)
            .and_then(|tags| tags.iter_mut().find(|t| t.name == tag_name))
            .ok_or_else(|| missing("Tag"))?;
        if let Some(name) = &request.name {
            tag.name = name.clone();
        }
        if let Some(fg) = &request.fg_color {
            tag.tag_fg = Some(fg.clone());
        }
        if let Some(bg) = &request.bg_color {
            tag.tag_bg = Some(bg.clone());
        }
        Ok(tag.clone())
    }

    async fn delete(&self, space_id: &str, tag_name: &str) -> ClickUpResult<()> {
        self.record("tags.delete");
        let mut state = self.state();
        let tags = state
            .tags
            .get_mut(space_id)
            .ok_or_else(|| missing("Tag"))?;
        let before = tags.len();
        tags.retain(|t| t.name != tag_name);
        if tags.len() == before {
            return Err(missing("Tag"));
        }
        Ok(())
    }

    async fn add_to_task(&self, task_id: &str, tag_name: &str) -> ClickUpResult<()> {
        self.record("tags.add_to_task");
        let mut state = self.state();
        let task = state.task_mut(task_id)?;
        if !task.tags.iter().any(|t| t.name == tag_name) {
            task.tags.push(Tag {
                name: tag_name.to_string(),
                tag_fg: None,
                tag_bg: None,
            });
        }
        Ok(())
    }

    async fn remove_from_task(&self, task_id: &str, tag_name: &str) -> ClickUpResult<()> {
        self.record("tags.remove_from_task");
        let mut state = self.state();
        let task = state.task_mut(task_id)?;
        task.tags.retain(|t| t.name != tag_name);
        Ok(())
    }
}

#[async_trait]
impl TimeApi for InMemoryClickUp {
    async fn entries(&self, query: &TimeEntryQuery) -> ClickUpResult<Vec<TimeEntry>> {
        self.record("time.entries");
        Ok(self
            .state()
            .time_entries
            .iter()
            .filter(|e| {
                query.task_id.as_ref().is_none_or(|id| {
                    e.task.as_ref().is_some_and(|t| &t.id == id)
                })
            })
            .cloned()
            .collect())
    }

    async fn start(&self, request: &StartTimerRequest) -> ClickUpResult<TimeEntry> {
        self.record("time.start");
        let mut state = self.state();
        let task = state.task_mut(&request.tid)?.clone();
        let entry = TimeEntry {
            id: state.next_id(),
            task: Some(TimeEntryTask {
                id: task.id,
                name: Some(task.name),
                custom_id: task.custom_id,
            }),
            user: None,
            billable: request.billable,
            start: Some("1700000000000".to_string()),
            end: None,
            duration: Some("-1700000000000".to_string()),
            description: request.description.clone(),
            tags: Vec::new(),
        };
        state.running = Some(entry.clone());
        Ok(entry)
    }

    async fn stop(&self) -> ClickUpResult<TimeEntry> {
        self.record("time.stop");
        let mut state = self.state();
        let mut entry = state.running.take().ok_or_else(|| ClickUpError::Api {
            status: 400,
            code: Some("TIMER_003".to_string()),
            message: "No timer running".to_string(),
        })?;
        entry.end = Some("1700000600000".to_string());
        entry.duration = Some("600000".to_string());
        state.time_entries.push(entry.clone());
        Ok(entry)
    }

    async fn create(&self, request: &CreateTimeEntryRequest) -> ClickUpResult<TimeEntry> {
        self.record("time.create");
        let mut state = self.state();
        let task = state.task_mut(&request.tid)?.clone();
        let entry = TimeEntry {
            id: state.next_id(),
            task: Some(TimeEntryTask {
                id: task.id,
                name: Some(task.name),
                custom_id: task.custom_id,
            }),
            user: None,
            billable: request.billable,
            start: Some(request.start.to_string()),
            end: Some((request.start + request.duration).to_string()),
            duration: Some(request.duration.to_string()),
            description: request.description.clone(),
            tags: Vec::new(),
        };
        state.time_entries.push(entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        self.record("time.delete");
        let mut state = self.state();
        let before = state.time_entries.len();
        state.time_entries.retain(|e| e.id != id);
        if state.time_entries.len() == before {
            return Err(missing("Time entry"));
        }
        Ok(())
    }

    async fn current(&self) -> ClickUpResult<Option<TimeEntry>> {
        self.record("time.current");
        Ok(self.state().running.clone())
    }
}

#[async_trait]
impl DocApi for InMemoryClickUp {
    async fn search(&self, query: &DocSearchQuery) -> ClickUpResult<DocList> {
        self.record("docs.search");
        let docs = self
            .state()
            .docs
            .iter()
            .filter(|d| query.id.as_ref().is_none_or(|id| &d.id == id))
            .cloned()
            .collect();
        Ok(DocList {
            docs,
            next_cursor: None,
        })
    }

    async fn get(&self, id: &str) -> ClickUpResult<Doc> {
        self.record("docs.get");
        self.state()
            .docs
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| missing("Doc"))
    }

    async fn create(&self, request: &CreateDocRequest) -> ClickUpResult<Doc> {
        self.record("docs.create");
        let mut state = self.state();
        let doc = Doc {
            id: state.next_id(),
            name: request.name.clone(),
            date_created: Some(1_700_000_000_000),
            date_updated: None,
            parent: request.parent.clone(),
            workspace_id: Some(TEST_WORKSPACE_ID.to_string()),
            creator: None,
            deleted: Some(false),
            archived: Some(false),
        };
        state.docs.push(doc.clone());
        Ok(doc)
    }

    async fn page_listing(
        &self,
        doc_id: &str,
        _max_depth: Option<i32>,
    ) -> ClickUpResult<Vec<DocPage>> {
        self.record("docs.page_listing");
        let state = self.state();
        if !state.docs.iter().any(|d| d.id == doc_id) {
            return Err(missing("Doc"));
        }
        Ok(state
            .pages
            .get(doc_id)
            .map(|pages| {
                pages
                    .iter()
                    .map(|p| DocPage {
                        content: None,
                        ..p.clone()
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn page(
        &self,
        doc_id: &str,
        page_id: &str,
        _content_format: Option<&str>,
    ) -> ClickUpResult<DocPage> {
        self.record("docs.page");
        self.state()
            .pages
            .get(doc_id)
            .and_then(|pages| pages.iter().find(|p| p.id == page_id))
            .cloned()
            .ok_or_else(|| missing("Page"))
    }

    async fn create_page(
        &self,
        doc_id: &str,
        request: &CreatePageRequest,
    ) -> ClickUpResult<DocPage> {
        self.record("docs.create_page");
        let mut state = self.state();
        if !state.docs.iter().any(|d| d.id == doc_id) {
            return Err(missing("Doc"));
        }
        let page = DocPage {
            id: state.next_id(),
            doc_id: Some(doc_id.to_string()),
            name: request.name.clone(),
            sub_title: request.sub_title.clone(),
            content: request.content.clone(),
            parent_page_id: request.parent_page_id.clone(),
            date_created: Some(1_700_000_000_000),
            date_updated: None,
            pages: Vec::new(),
        };
        state
            .pages
            .entry(doc_id.to_string())
            .or_default()
            .push(page.clone());
        Ok(page)
    }

    async fn update_page(
        &self,
        doc_id: &str,
        page_id: &str,
        request: &UpdatePageRequest,
    ) -> ClickUpResult<()> {
        self.record("docs.update_page");
        let mut state = self.state();
        let page = state
            .pages
            .get_mut(doc_id)
            .and_then(|pages| pages.iter_mut().find(|p| p.id == page_id))
            .ok_or_else(|| missing("Page"))?;
        if let Some(name) = &request.name {
            page.name = Some(name.clone());
        }
        if let Some(sub_title) = &request.sub_title {
            page.sub_title = Some(sub_title.clone());
        }
        if let Some(content) = &request.content {
            page.content = Some(match request.content_edit_mode.as_deref() {
                Some("append") => format!("{}{}", page.content.clone().unwrap_or_default(), content),
                Some("prepend") => format!("{}{}", content, page.content.clone().unwrap_or_default()),
                _ => content.clone(),
            });
        }
        Ok(())
    }
}

impl ClickUpApi for InMemoryClickUp {
    fn workspace_id(&self) -> &str {
        TEST_WORKSPACE_ID
    }

    fn members(&self) -> &dyn MemberApi {
        self
    }

    fn spaces(&self) -> &dyn SpaceApi {
        self
    }

    fn folders(&self) -> &dyn FolderApi {
        self
    }

    fn lists(&self) -> &dyn ListApi {
        self
    }

    fn tasks(&self) -> &dyn TaskApi {
        self
    }

    fn tags(&self) -> &dyn TagApi {
        self
    }

    fn time(&self) -> &dyn TimeApi {
        self
    }

    fn docs(&self) -> &dyn DocApi {
        self
    }
}
