//! Document tools (ClickUp Docs, API v3).
//!
//! Only exposed when document support is switched on.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::clickup::models::{
    CreateDocRequest, CreatePageRequest, DocParent, DocSearchQuery, UpdatePageRequest,
};
use crate::mcp::envelope::Envelope;
use crate::mcp::error::{ToolError, ToolResult};
use crate::mcp::registry::{ToolFamily, ToolRegistry};
use crate::mcp::tools::{ToolContext, non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    Public,
    Private,
    Personal,
    Hidden,
}

impl Visibility {
    fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Private => "PRIVATE",
            Visibility::Personal => "PERSONAL",
            Visibility::Hidden => "HIDDEN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ContentFormat {
    #[serde(rename = "text/md")]
    Markdown,
    #[serde(rename = "text/plain")]
    Plain,
}

impl ContentFormat {
    fn as_str(self) -> &'static str {
        match self {
            ContentFormat::Markdown => "text/md",
            ContentFormat::Plain => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Replace,
    Append,
    Prepend,
}

impl EditMode {
    fn as_str(self) -> &'static str {
        match self {
            EditMode::Replace => "replace",
            EditMode::Append => "append",
            EditMode::Prepend => "prepend",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateDocumentParams {
    #[schemars(description = "Document name")]
    pub name: String,
    #[schemars(description = "Where the document lives; defaults to the workspace")]
    pub parent: Option<DocParent>,
    #[schemars(description = "PUBLIC, PRIVATE, PERSONAL or HIDDEN")]
    pub visibility: Option<Visibility>,
    #[schemars(description = "Create an empty first page (default: true)")]
    pub create_page: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRefParams {
    #[schemars(description = "Document ID")]
    pub document_id: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListDocumentsParams {
    #[schemars(description = "Only the document with this ID")]
    pub id: Option<String>,
    #[schemars(description = "Only documents created by this user ID")]
    pub creator: Option<i64>,
    #[schemars(description = "Include deleted documents")]
    pub deleted: Option<bool>,
    #[schemars(description = "Include archived documents")]
    pub archived: Option<bool>,
    #[schemars(description = "Only documents under this parent ID")]
    pub parent_id: Option<String>,
    #[schemars(description = "Parent type: SPACE, FOLDER, LIST, EVERYTHING or WORKSPACE")]
    pub parent_type: Option<String>,
    #[schemars(description = "Maximum number of documents to return")]
    pub limit: Option<u32>,
    #[schemars(description = "Cursor from a previous call, for the next page")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListPagesParams {
    #[serde(rename = "documentId")]
    #[schemars(description = "Document ID")]
    pub document_id: String,
    #[schemars(description = "How deep to list nested pages; -1 for all levels")]
    pub max_page_depth: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetPagesParams {
    #[serde(rename = "documentId")]
    #[schemars(description = "Document ID")]
    pub document_id: String,
    #[serde(rename = "pageIds")]
    #[schemars(description = "IDs of the pages to fetch")]
    pub page_ids: Vec<String>,
    #[schemars(description = "text/md (default) or text/plain")]
    pub content_format: Option<ContentFormat>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreatePageParams {
    #[serde(rename = "documentId")]
    #[schemars(description = "Document ID")]
    pub document_id: String,
    #[schemars(description = "Page name")]
    pub name: String,
    #[schemars(description = "Page subtitle")]
    pub sub_title: Option<String>,
    #[schemars(description = "Page content")]
    pub content: Option<String>,
    #[schemars(description = "Format of content: text/md (default) or text/plain")]
    pub content_format: Option<ContentFormat>,
    #[schemars(description = "Create the page under this page")]
    pub parent_page_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdatePageParams {
    #[serde(rename = "documentId")]
    #[schemars(description = "Document ID")]
    pub document_id: String,
    #[serde(rename = "pageId")]
    #[schemars(description = "Page ID")]
    pub page_id: String,
    #[schemars(description = "New page name")]
    pub name: Option<String>,
    #[schemars(description = "New subtitle")]
    pub sub_title: Option<String>,
    #[schemars(description = "New content")]
    pub content: Option<String>,
    #[schemars(description = "replace (default), append or prepend the content")]
    pub content_edit_mode: Option<EditMode>,
    #[schemars(description = "Format of content: text/md (default) or text/plain")]
    pub content_format: Option<ContentFormat>,
}

async fn create_document(ctx: ToolContext, params: CreateDocumentParams) -> ToolResult<Envelope> {
    let request = CreateDocRequest {
        name: non_empty(&params.name, "name")?.to_string(),
        parent: params.parent.clone(),
        visibility: params.visibility.map(|v| v.as_str().to_string()),
        create_page: Some(params.create_page.unwrap_or(true)),
    };
    let doc = ctx.api().docs().create(&request).await?;
    Envelope::new(format!("Document '{}' created with id {}", doc.name, doc.id))
        .with("document", doc)
}

async fn get_document(ctx: ToolContext, params: DocumentRefParams) -> ToolResult<Envelope> {
    let id = non_empty(&params.document_id, "documentId")?;
    let doc = ctx.api().docs().get(id).await?;
    Envelope::new(format!("Retrieved document '{}' (id {})", doc.name, doc.id))
        .with("document", doc)
}

async fn list_documents(ctx: ToolContext, params: ListDocumentsParams) -> ToolResult<Envelope> {
    let query = DocSearchQuery {
        id: params.id,
        creator: params.creator,
        deleted: params.deleted,
        archived: params.archived,
        parent_id: params.parent_id,
        parent_type: params.parent_type,
        limit: params.limit,
        next_cursor: params.next_cursor,
    };
    let list = ctx.api().docs().search(&query).await?;
    Envelope::new(format!("Found {} documents", list.docs.len()))
        .with("count", list.docs.len())?
        .with("next_cursor", list.next_cursor)?
        .with("documents", list.docs)
}

async fn list_document_pages(ctx: ToolContext, params: ListPagesParams) -> ToolResult<Envelope> {
    let id = non_empty(&params.document_id, "documentId")?;
    let pages = ctx
        .api()
        .docs()
        .page_listing(id, params.max_page_depth)
        .await?;
    Envelope::new(format!("Document {id} has {} top-level pages", pages.len()))
        .with("pages", pages)
}

async fn get_document_pages(ctx: ToolContext, params: GetPagesParams) -> ToolResult<Envelope> {
    let doc_id = non_empty(&params.document_id, "documentId")?;
    if params.page_ids.is_empty() {
        return Err(ToolError::invalid_params("pageIds must not be empty"));
    }
    let format = params.content_format.map(ContentFormat::as_str);

    let mut pages = Vec::with_capacity(params.page_ids.len());
    for page_id in &params.page_ids {
        pages.push(ctx.api().docs().page(doc_id, page_id, format).await?);
    }
    Envelope::new(format!("Retrieved {} pages from document {doc_id}", pages.len()))
        .with("pages", pages)
}

async fn create_document_page(ctx: ToolContext, params: CreatePageParams) -> ToolResult<Envelope> {
    let doc_id = non_empty(&params.document_id, "documentId")?;
    let request = CreatePageRequest {
        parent_page_id: params.parent_page_id.clone(),
        name: Some(non_empty(&params.name, "name")?.to_string()),
        sub_title: params.sub_title.clone(),
        content: params.content.clone(),
        content_format: params.content_format.map(|f| f.as_str().to_string()),
    };
    let page = ctx.api().docs().create_page(doc_id, &request).await?;
    Envelope::new(format!("Page {} created in document {doc_id}", page.id)).with("page", page)
}

async fn update_document_page(ctx: ToolContext, params: UpdatePageParams) -> ToolResult<Envelope> {
    let doc_id = non_empty(&params.document_id, "documentId")?;
    let page_id = non_empty(&params.page_id, "pageId")?;
    let request = UpdatePageRequest {
        name: params.name.clone(),
        sub_title: params.sub_title.clone(),
        content: params.content.clone(),
        content_edit_mode: params.content_edit_mode.map(|m| m.as_str().to_string()),
        content_format: params.content_format.map(|f| f.as_str().to_string()),
    };
    if request.has_no_changes() {
        return Err(ToolError::invalid_params("No update data provided"));
    }
    ctx.api().docs().update_page(doc_id, page_id, &request).await?;
    Envelope::new(format!("Page {page_id} in document {doc_id} updated"))
        .with("documentId", doc_id)?
        .with("pageId", page_id)
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register(
        ToolFamily::Document,
        "create_document",
        "Create a ClickUp doc, by default at the workspace level with an empty first page.",
        create_document,
    );
    registry.register(
        ToolFamily::Document,
        "get_document",
        "Get a doc's details by documentId.",
        get_document,
    );
    registry.register(
        ToolFamily::Document,
        "list_documents",
        "Search docs in the workspace by id, creator, parent, deleted or archived state.",
        list_documents,
    );
    registry.register(
        ToolFamily::Document,
        "list_document_pages",
        "List the page tree of a doc (names and IDs, no content).",
        list_document_pages,
    );
    registry.register(
        ToolFamily::Document,
        "get_document_pages",
        "Get the content of specific pages of a doc.",
        get_document_pages,
    );
    registry.register(
        ToolFamily::Document,
        "create_document_page",
        "Add a page to a doc, optionally nested under another page.",
        create_document_page,
    );
    registry.register(
        ToolFamily::Document,
        "update_document_page",
        "Update a page's name, subtitle or content. content_edit_mode chooses replace, append or prepend.",
        update_document_page,
    );
}
