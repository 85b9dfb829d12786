//! Backend traits for ClickUp access.
//!
//! One trait per resource family, combined behind [`ClickUpApi`]. Tool
//! handlers only see these traits, so the HTTP client and the in-memory
//! test backend are interchangeable.

use async_trait::async_trait;

use crate::clickup::{
    ClickUpResult,
    models::{
        Comment, CreateCommentRequest, CreateDocRequest, CreateListRequest, CreatePageRequest,
        CreateSpaceRequest, CreateTagRequest, CreateTaskRequest, CreateTimeEntryRequest, Doc,
        DocList, DocPage, DocSearchQuery, Folder, FolderRequest, List, Space, StartTimerRequest,
        Tag, Task, TaskPage, TaskQuery, TimeEntry, TimeEntryQuery, UpdateListRequest,
        UpdatePageRequest, UpdateSpaceRequest, UpdateTagRequest, UpdateTaskRequest, User,
    },
};

/// Workspace member access.
#[async_trait]
pub trait MemberApi: Send + Sync {
    /// All members of the configured workspace.
    async fn list(&self) -> ClickUpResult<Vec<User>>;
}

/// Space operations.
#[async_trait]
pub trait SpaceApi: Send + Sync {
    /// Spaces in the workspace, optionally including archived ones.
    async fn list(&self, archived: bool) -> ClickUpResult<Vec<Space>>;

    async fn get(&self, id: &str) -> ClickUpResult<Space>;

    async fn create(&self, request: &CreateSpaceRequest) -> ClickUpResult<Space>;

    async fn update(&self, id: &str, request: &UpdateSpaceRequest) -> ClickUpResult<Space>;

    async fn delete(&self, id: &str) -> ClickUpResult<()>;
}

/// Folder operations.
#[async_trait]
pub trait FolderApi: Send + Sync {
    /// Folders in a space.
    async fn list(&self, space_id: &str) -> ClickUpResult<Vec<Folder>>;

    async fn get(&self, id: &str) -> ClickUpResult<Folder>;

    async fn create(&self, space_id: &str, request: &FolderRequest) -> ClickUpResult<Folder>;

    async fn update(&self, id: &str, request: &FolderRequest) -> ClickUpResult<Folder>;

    async fn delete(&self, id: &str) -> ClickUpResult<()>;
}

/// List operations.
#[async_trait]
pub trait ListApi: Send + Sync {
    /// Lists inside a folder.
    async fn list_in_folder(&self, folder_id: &str) -> ClickUpResult<Vec<List>>;

    /// Lists directly under a space (not inside any folder).
    async fn list_folderless(&self, space_id: &str) -> ClickUpResult<Vec<List>>;

    async fn get(&self, id: &str) -> ClickUpResult<List>;

    async fn create_in_space(
        &self,
        space_id: &str,
        request: &CreateListRequest,
    ) -> ClickUpResult<List>;

    async fn create_in_folder(
        &self,
        folder_id: &str,
        request: &CreateListRequest,
    ) -> ClickUpResult<List>;

    async fn update(&self, id: &str, request: &UpdateListRequest) -> ClickUpResult<List>;

    async fn delete(&self, id: &str) -> ClickUpResult<()>;
}

/// Task and comment operations.
///
/// Task ids may be ClickUp ids or custom ids (`DEV-42`); implementations are
/// responsible for telling the backend which kind they were given.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn get(&self, id: &str, include_subtasks: bool) -> ClickUpResult<Task>;

    /// Tasks in one list, filters forwarded as query parameters.
    async fn list_in_list(&self, list_id: &str, query: &TaskQuery) -> ClickUpResult<TaskPage>;

    /// Workspace-wide task search, filters forwarded as query parameters.
    async fn search(&self, query: &TaskQuery) -> ClickUpResult<TaskPage>;

    async fn create(&self, list_id: &str, request: &CreateTaskRequest) -> ClickUpResult<Task>;

    async fn update(&self, id: &str, request: &UpdateTaskRequest) -> ClickUpResult<Task>;

    async fn delete(&self, id: &str) -> ClickUpResult<()>;

    /// Change the task's home list.
    async fn move_to_list(&self, id: &str, list_id: &str) -> ClickUpResult<Task>;

    async fn comments(&self, id: &str) -> ClickUpResult<Vec<Comment>>;

    async fn add_comment(&self, id: &str, request: &CreateCommentRequest)
    -> ClickUpResult<Comment>;
}

/// Space tag operations.
#[async_trait]
pub trait TagApi: Send + Sync {
    async fn list(&self, space_id: &str) -> ClickUpResult<Vec<Tag>>;

    async fn create(&self, space_id: &str, request: &CreateTagRequest) -> ClickUpResult<Tag>;

    async fn update(
        &self,
        space_id: &str,
        tag_name: &str,
        request: &UpdateTagRequest,
    ) -> ClickUpResult<Tag>;

    async fn delete(&self, space_id: &str, tag_name: &str) -> ClickUpResult<()>;

    async fn add_to_task(&self, task_id: &str, tag_name: &str) -> ClickUpResult<()>;

    async fn remove_from_task(&self, task_id: &str, tag_name: &str) -> ClickUpResult<()>;
}

/// Time tracking operations.
#[async_trait]
pub trait TimeApi: Send + Sync {
    async fn entries(&self, query: &TimeEntryQuery) -> ClickUpResult<Vec<TimeEntry>>;

    async fn start(&self, request: &StartTimerRequest) -> ClickUpResult<TimeEntry>;

    async fn stop(&self) -> ClickUpResult<TimeEntry>;

    async fn create(&self, request: &CreateTimeEntryRequest) -> ClickUpResult<TimeEntry>;

    async fn delete(&self, id: &str) -> ClickUpResult<()>;

    /// The running timer, if any.
    async fn current(&self) -> ClickUpResult<Option<TimeEntry>>;
}

/// Doc and page operations (API v3).
#[async_trait]
pub trait DocApi: Send + Sync {
    async fn search(&self, query: &DocSearchQuery) -> ClickUpResult<DocList>;

    async fn get(&self, id: &str) -> ClickUpResult<Doc>;

    async fn create(&self, request: &CreateDocRequest) -> ClickUpResult<Doc>;

    /// Page tree without content.
    async fn page_listing(&self, doc_id: &str, max_depth: Option<i32>)
    -> ClickUpResult<Vec<DocPage>>;

    async fn page(
        &self,
        doc_id: &str,
        page_id: &str,
        content_format: Option<&str>,
    ) -> ClickUpResult<DocPage>;

    async fn create_page(&self, doc_id: &str, request: &CreatePageRequest)
    -> ClickUpResult<DocPage>;

    async fn update_page(
        &self,
        doc_id: &str,
        page_id: &str,
        request: &UpdatePageRequest,
    ) -> ClickUpResult<()>;
}

/// Combined backend interface.
pub trait ClickUpApi: Send + Sync {
    /// Workspace (team) id every workspace-scoped call runs against.
    fn workspace_id(&self) -> &str;

    fn members(&self) -> &dyn MemberApi;

    fn spaces(&self) -> &dyn SpaceApi;

    fn folders(&self) -> &dyn FolderApi;

    fn lists(&self) -> &dyn ListApi;

    fn tasks(&self) -> &dyn TaskApi;

    fn tags(&self) -> &dyn TagApi;

    fn time(&self) -> &dyn TimeApi;

    fn docs(&self) -> &dyn DocApi;
}
