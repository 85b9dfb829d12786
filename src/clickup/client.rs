//! HTTP implementation of the ClickUp backend traits.
//!
//! Every trait method performs exactly one HTTP exchange (two for
//! `move_to_list`, which re-reads the task), so one client can be shared by
//! every concurrent tool call.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url, header::AUTHORIZATION};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;

use crate::clickup::{
    ClickUpError, ClickUpResult,
    api::{ClickUpApi, DocApi, FolderApi, ListApi, MemberApi, SpaceApi, TagApi, TaskApi, TimeApi},
    models::{
        Comment, CreateCommentRequest, CreateDocRequest, CreateListRequest, CreatePageRequest,
        CreateSpaceRequest, CreateTagRequest, CreateTaskRequest, CreateTimeEntryRequest, Doc,
        DocList, DocPage, DocSearchQuery, Folder, FolderRequest, List, Space, StartTimerRequest,
        Tag, Task, TaskPage, TaskQuery, TimeEntry, TimeEntryQuery, UpdateListRequest,
        UpdatePageRequest, UpdateSpaceRequest, UpdateTagRequest, UpdateTaskRequest, User,
    },
};

/// Default ClickUp API origin.
pub const DEFAULT_API_URL: &str = "https://api.clickup.com";

/// Returns true for custom task ids such as `DEV-1234`.
///
/// ClickUp needs `custom_task_ids=true&team_id=...` to look these up.
pub fn is_custom_task_id(id: &str) -> bool {
    let Some((prefix, number)) = id.rsplit_once('-') else {
        return false;
    };
    !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && prefix.chars().any(|c| c.is_ascii_alphabetic())
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

/// Authenticated ClickUp API client.
#[derive(Clone)]
pub struct HttpClickUp {
    base_url: Url,
    api_key: String,
    workspace_id: String,
    client: Client,
}

impl HttpClickUp {
    /// Create a client for one workspace.
    ///
    /// `api_url` overrides the API origin (tests point it at a local fake).
    pub fn new(
        api_key: impl Into<String>,
        workspace_id: impl Into<String>,
        api_url: Option<&str>,
    ) -> ClickUpResult<Self> {
        let raw = api_url.unwrap_or(DEFAULT_API_URL);
        let base_url = Url::parse(raw).map_err(|e| ClickUpError::Configuration {
            message: format!("{raw}: {e}"),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClickUpError::Configuration {
                message: format!("{raw} is not an http(s) base URL"),
            });
        }

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            workspace_id: workspace_id.into(),
            client: Client::new(),
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build `<origin>/api/<version>/<segments...>` with each segment escaped.
    fn url(&self, version: &str, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").push(version).extend(segments);
        }
        url
    }

    fn v2(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.request(method, self.url("v2", segments))
    }

    fn v3(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut all = vec!["workspaces", self.workspace_id.as_str()];
        all.extend_from_slice(segments);
        self.request(method, self.url("v3", &all))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "clickup request");
        self.client
            .request(method, url)
            .header(AUTHORIZATION, &self.api_key)
    }

    /// Query pairs that make custom task ids resolvable.
    fn task_id_query(&self, id: &str) -> Vec<(&'static str, String)> {
        if is_custom_task_id(id) {
            vec![
                ("custom_task_ids", "true".to_string()),
                ("team_id", self.workspace_id.clone()),
            ]
        } else {
            Vec::new()
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> ClickUpResult<T> {
        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    async fn send_empty(builder: RequestBuilder) -> ClickUpResult<()> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success, or a
    /// `ClickUpError::Api` on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> ClickUpResult<T> {
        if response.status().is_success() {
            let text = response.text().await?;
            let body = if text.trim().is_empty() { "null" } else { &text };
            serde_json::from_str(body).map_err(ClickUpError::from)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ClickUpError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ClickUpError::from_response(status, &body)
    }
}

// Response wrappers
#[derive(Deserialize)]
struct Teams {
    teams: Vec<Team>,
}

#[derive(Deserialize)]
struct Team {
    #[serde(deserialize_with = "crate::serde_utils::string_or_number")]
    id: String,
    #[serde(default)]
    members: Vec<TeamMember>,
}

#[derive(Deserialize)]
struct TeamMember {
    user: User,
}

#[derive(Deserialize)]
struct Spaces {
    spaces: Vec<Space>,
}

#[derive(Deserialize)]
struct Folders {
    folders: Vec<Folder>,
}

#[derive(Deserialize)]
struct Lists {
    lists: Vec<List>,
}

#[derive(Deserialize)]
struct Tags {
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct TagEnvelope {
    tag: Option<Tag>,
}

#[derive(Deserialize)]
struct Comments {
    comments: Vec<Comment>,
}

#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageListing {
    Pages(Vec<DocPage>),
    Wrapped { pages: Vec<DocPage> },
}

#[async_trait]
impl MemberApi for HttpClickUp {
    async fn list(&self) -> ClickUpResult<Vec<User>> {
        let teams: Teams = Self::send(self.v2(Method::GET, &["team"])).await?;
        teams
            .teams
            .into_iter()
            .find(|team| team.id == self.workspace_id)
            .map(|team| team.members.into_iter().map(|m| m.user).collect())
            .ok_or_else(|| ClickUpError::not_found("workspace", self.workspace_id.clone()))
    }
}

#[async_trait]
impl SpaceApi for HttpClickUp {
    async fn list(&self, archived: bool) -> ClickUpResult<Vec<Space>> {
        let builder = self
            .v2(Method::GET, &["team", self.workspace_id.as_str(), "space"])
            .query(&[("archived", archived)]);
        let spaces: Spaces = Self::send(builder).await?;
        Ok(spaces.spaces)
    }

    async fn get(&self, id: &str) -> ClickUpResult<Space> {
        Self::send(self.v2(Method::GET, &["space", id])).await
    }

    async fn create(&self, request: &CreateSpaceRequest) -> ClickUpResult<Space> {
        let builder = self
            .v2(Method::POST, &["team", self.workspace_id.as_str(), "space"])
            .json(request);
        Self::send(builder).await
    }

    async fn update(&self, id: &str, request: &UpdateSpaceRequest) -> ClickUpResult<Space> {
        Self::send(self.v2(Method::PUT, &["space", id]).json(request)).await
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        Self::send_empty(self.v2(Method::DELETE, &["space", id])).await
    }
}

#[async_trait]
impl FolderApi for HttpClickUp {
    async fn list(&self, space_id: &str) -> ClickUpResult<Vec<Folder>> {
        let builder = self
            .v2(Method::GET, &["space", space_id, "folder"])
            .query(&[("archived", false)]);
        let folders: Folders = Self::send(builder).await?;
        Ok(folders.folders)
    }

    async fn get(&self, id: &str) -> ClickUpResult<Folder> {
        Self::send(self.v2(Method::GET, &["folder", id])).await
    }

    async fn create(&self, space_id: &str, request: &FolderRequest) -> ClickUpResult<Folder> {
        let builder = self
            .v2(Method::POST, &["space", space_id, "folder"])
            .json(request);
        Self::send(builder).await
    }

    async fn update(&self, id: &str, request: &FolderRequest) -> ClickUpResult<Folder> {
        Self::send(self.v2(Method::PUT, &["folder", id]).json(request)).await
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        Self::send_empty(self.v2(Method::DELETE, &["folder", id])).await
    }
}

#[async_trait]
impl ListApi for HttpClickUp {
    async fn list_in_folder(&self, folder_id: &str) -> ClickUpResult<Vec<List>> {
        let builder = self
            .v2(Method::GET, &["folder", folder_id, "list"])
            .query(&[("archived", false)]);
        let lists: Lists = Self::send(builder).await?;
        Ok(lists.lists)
    }

    async fn list_folderless(&self, space_id: &str) -> ClickUpResult<Vec<List>> {
        let builder = self
            .v2(Method::GET, &["space", space_id, "list"])
            .query(&[("archived", false)]);
        let lists: Lists = Self::send(builder).await?;
        Ok(lists.lists)
    }

    async fn get(&self, id: &str) -> ClickUpResult<List> {
        Self::send(self.v2(Method::GET, &["list", id])).await
    }

    async fn create_in_space(
        &self,
        space_id: &str,
        request: &CreateListRequest,
    ) -> ClickUpResult<List> {
        let builder = self
            .v2(Method::POST, &["space", space_id, "list"])
            .json(request);
        Self::send(builder).await
    }

    async fn create_in_folder(
        &self,
        folder_id: &str,
        request: &CreateListRequest,
    ) -> ClickUpResult<List> {
        let builder = self
            .v2(Method::POST, &["folder", folder_id, "list"])
            .json(request);
        Self::send(builder).await
    }

    async fn update(&self, id: &str, request: &UpdateListRequest) -> ClickUpResult<List> {
        Self::send(self.v2(Method::PUT, &["list", id]).json(request)).await
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        Self::send_empty(self.v2(Method::DELETE, &["list", id])).await
    }
}

#[async_trait]
impl TaskApi for HttpClickUp {
    async fn get(&self, id: &str, include_subtasks: bool) -> ClickUpResult<Task> {
        let mut query = self.task_id_query(id);
        if include_subtasks {
            query.push(("include_subtasks", "true".to_string()));
        }
        Self::send(self.v2(Method::GET, &["task", id]).query(&query)).await
    }

    async fn list_in_list(&self, list_id: &str, query: &TaskQuery) -> ClickUpResult<TaskPage> {
        let builder = self
            .v2(Method::GET, &["list", list_id, "task"])
            .query(&query.to_query_pairs());
        Self::send(builder).await
    }

    async fn search(&self, query: &TaskQuery) -> ClickUpResult<TaskPage> {
        let builder = self
            .v2(Method::GET, &["team", self.workspace_id.as_str(), "task"])
            .query(&query.to_query_pairs());
        Self::send(builder).await
    }

    async fn create(&self, list_id: &str, request: &CreateTaskRequest) -> ClickUpResult<Task> {
        let builder = self
            .v2(Method::POST, &["list", list_id, "task"])
            .json(request);
        Self::send(builder).await
    }

    async fn update(&self, id: &str, request: &UpdateTaskRequest) -> ClickUpResult<Task> {
        let builder = self
            .v2(Method::PUT, &["task", id])
            .query(&self.task_id_query(id))
            .json(request);
        Self::send(builder).await
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        let builder = self
            .v2(Method::DELETE, &["task", id])
            .query(&self.task_id_query(id));
        Self::send_empty(builder).await
    }

    async fn move_to_list(&self, id: &str, list_id: &str) -> ClickUpResult<Task> {
        let builder = self
            .v3(Method::PUT, &["tasks", id, "home_list", list_id])
            .query(&self.task_id_query(id));
        Self::send_empty(builder).await?;
        TaskApi::get(self, id, false).await
    }

    async fn comments(&self, id: &str) -> ClickUpResult<Vec<Comment>> {
        let builder = self
            .v2(Method::GET, &["task", id, "comment"])
            .query(&self.task_id_query(id));
        let comments: Comments = Self::send(builder).await?;
        Ok(comments.comments)
    }

    async fn add_comment(
        &self,
        id: &str,
        request: &CreateCommentRequest,
    ) -> ClickUpResult<Comment> {
        let builder = self
            .v2(Method::POST, &["task", id, "comment"])
            .query(&self.task_id_query(id))
            .json(request);
        // The create response only carries id and date
        let mut comment: Comment = Self::send(builder).await?;
        if comment.comment_text.is_none() {
            comment.comment_text = Some(request.comment_text.clone());
        }
        Ok(comment)
    }
}

#[async_trait]
impl TagApi for HttpClickUp {
    async fn list(&self, space_id: &str) -> ClickUpResult<Vec<Tag>> {
        let tags: Tags = Self::send(self.v2(Method::GET, &["space", space_id, "tag"])).await?;
        Ok(tags.tags)
    }

    async fn create(&self, space_id: &str, request: &CreateTagRequest) -> ClickUpResult<Tag> {
        let builder = self
            .v2(Method::POST, &["space", space_id, "tag"])
            .json(&json!({ "tag": request }));
        Self::send_empty(builder).await?;
        Ok(Tag {
            name: request.name.clone(),
            tag_fg: request.tag_fg.clone(),
            tag_bg: request.tag_bg.clone(),
        })
    }

    async fn update(
        &self,
        space_id: &str,
        tag_name: &str,
        request: &UpdateTagRequest,
    ) -> ClickUpResult<Tag> {
        let builder = self
            .v2(Method::PUT, &["space", space_id, "tag", tag_name])
            .json(&json!({ "tag": request }));
        let response: Option<TagEnvelope> = Self::send(builder).await?;
        Ok(response.and_then(|r| r.tag).unwrap_or_else(|| Tag {
            name: request.name.clone().unwrap_or_else(|| tag_name.to_string()),
            tag_fg: request.fg_color.clone(),
            tag_bg: request.bg_color.clone(),
        }))
    }

    async fn delete(&self, space_id: &str, tag_name: &str) -> ClickUpResult<()> {
        let builder = self
            .v2(Method::DELETE, &["space", space_id, "tag", tag_name])
            .json(&json!({ "tag": { "name": tag_name } }));
        Self::send_empty(builder).await
    }

    async fn add_to_task(&self, task_id: &str, tag_name: &str) -> ClickUpResult<()> {
        let builder = self
            .v2(Method::POST, &["task", task_id, "tag", tag_name])
            .query(&self.task_id_query(task_id));
        Self::send_empty(builder).await
    }

    async fn remove_from_task(&self, task_id: &str, tag_name: &str) -> ClickUpResult<()> {
        let builder = self
            .v2(Method::DELETE, &["task", task_id, "tag", tag_name])
            .query(&self.task_id_query(task_id));
        Self::send_empty(builder).await
    }
}

#[async_trait]
impl TimeApi for HttpClickUp {
    async fn entries(&self, query: &TimeEntryQuery) -> ClickUpResult<Vec<TimeEntry>> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(task_id) = &query.task_id {
            pairs.push(("task_id", task_id.clone()));
            if is_custom_task_id(task_id) {
                pairs.push(("custom_task_ids", "true".to_string()));
                pairs.push(("team_id", self.workspace_id.clone()));
            }
        }
        if let Some(start) = query.start_date {
            pairs.push(("start_date", start.to_string()));
        }
        if let Some(end) = query.end_date {
            pairs.push(("end_date", end.to_string()));
        }
        let builder = self
            .v2(Method::GET, &["team", self.workspace_id.as_str(), "time_entries"])
            .query(&pairs);
        let entries: Data<Vec<TimeEntry>> = Self::send(builder).await?;
        Ok(entries.data)
    }

    async fn start(&self, request: &StartTimerRequest) -> ClickUpResult<TimeEntry> {
        let builder = self
            .v2(
                Method::POST,
                &["team", self.workspace_id.as_str(), "time_entries", "start"],
            )
            .json(request);
        let entry: Data<TimeEntry> = Self::send(builder).await?;
        Ok(entry.data)
    }

    async fn stop(&self) -> ClickUpResult<TimeEntry> {
        let builder = self.v2(
            Method::POST,
            &["team", self.workspace_id.as_str(), "time_entries", "stop"],
        );
        let entry: Data<TimeEntry> = Self::send(builder).await?;
        Ok(entry.data)
    }

    async fn create(&self, request: &CreateTimeEntryRequest) -> ClickUpResult<TimeEntry> {
        let builder = self
            .v2(Method::POST, &["team", self.workspace_id.as_str(), "time_entries"])
            .json(request);
        let entry: Data<TimeEntry> = Self::send(builder).await?;
        Ok(entry.data)
    }

    async fn delete(&self, id: &str) -> ClickUpResult<()> {
        Self::send_empty(self.v2(
            Method::DELETE,
            &["team", self.workspace_id.as_str(), "time_entries", id],
        ))
        .await
    }

    async fn current(&self) -> ClickUpResult<Option<TimeEntry>> {
        let builder = self.v2(
            Method::GET,
            &["team", self.workspace_id.as_str(), "time_entries", "current"],
        );
        let entry: Data<Option<TimeEntry>> = Self::send(builder).await?;
        Ok(entry.data)
    }
}

#[async_trait]
impl DocApi for HttpClickUp {
    async fn search(&self, query: &DocSearchQuery) -> ClickUpResult<DocList> {
        Self::send(self.v3(Method::GET, &["docs"]).query(&query.to_query_pairs())).await
    }

    async fn get(&self, id: &str) -> ClickUpResult<Doc> {
        Self::send(self.v3(Method::GET, &["docs", id])).await
    }

    async fn create(&self, request: &CreateDocRequest) -> ClickUpResult<Doc> {
        Self::send(self.v3(Method::POST, &["docs"]).json(request)).await
    }

    async fn page_listing(
        &self,
        doc_id: &str,
        max_depth: Option<i32>,
    ) -> ClickUpResult<Vec<DocPage>> {
        let mut builder = self.v3(Method::GET, &["docs", doc_id, "pageListing"]);
        if let Some(depth) = max_depth {
            builder = builder.query(&[("max_page_depth", depth)]);
        }
        let listing: PageListing = Self::send(builder).await?;
        Ok(match listing {
            PageListing::Pages(pages) | PageListing::Wrapped { pages } => pages,
        })
    }

    async fn page(
        &self,
        doc_id: &str,
        page_id: &str,
        content_format: Option<&str>,
    ) -> ClickUpResult<DocPage> {
        let mut builder = self.v3(Method::GET, &["docs", doc_id, "pages", page_id]);
        if let Some(format) = content_format {
            builder = builder.query(&[("content_format", format)]);
        }
        Self::send(builder).await
    }

    async fn create_page(
        &self,
        doc_id: &str,
        request: &CreatePageRequest,
    ) -> ClickUpResult<DocPage> {
        let builder = self
            .v3(Method::POST, &["docs", doc_id, "pages"])
            .json(request);
        Self::send(builder).await
    }

    async fn update_page(
        &self,
        doc_id: &str,
        page_id: &str,
        request: &UpdatePageRequest,
    ) -> ClickUpResult<()> {
        let builder = self
            .v3(Method::PUT, &["docs", doc_id, "pages", page_id])
            .json(request);
        Self::send_empty(builder).await
    }
}

impl ClickUpApi for HttpClickUp {
    fn workspace_id(&self) -> &str {
        &self.workspace_id
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
