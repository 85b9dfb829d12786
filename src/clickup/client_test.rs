//! HTTP client tests against a local fake ClickUp server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use serde_json::{Value, json};

use crate::clickup::{
    ClickUpApi, ClickUpError, HttpClickUp, is_custom_task_id,
    models::{CreateTagRequest, TaskQuery, UpdateTaskRequest},
};

fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    query: String,
    auth: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Fake {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<HashMap<String, (StatusCode, String)>>,
}

impl Fake {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn fake_handler(
    State(fake): State<Fake>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let key = format!("{} {}", method, uri.path());
    fake.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        auth: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    fake.responses.get(&key).cloned().unwrap_or((
        StatusCode::NOT_FOUND,
        r#"{"err":"Route not found","ECODE":"APP_001"}"#.to_string(),
    ))
}

/// Start a fake server answering `"METHOD /path"` keys with canned bodies.
async fn start_fake(routes: &[(&str, u16, Value)]) -> (HttpClickUp, Fake) {
    init_crypto();
    let responses = routes
        .iter()
        .map(|(key, status, body)| {
            (
                key.to_string(),
                (StatusCode::from_u16(*status).unwrap(), body.to_string()),
            )
        })
        .collect();
    let fake = Fake {
        requests: Arc::default(),
        responses: Arc::new(responses),
    };
    let app = Router::new()
        .fallback(fake_handler)
        .with_state(fake.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = HttpClickUp::new("pk_test", "9000", Some(&format!("http://{addr}"))).unwrap();
    (client, fake)
}

#[test]
fn rejects_non_http_api_url() {
    init_crypto();
    let err = HttpClickUp::new("pk", "1", Some("ftp://example.com")).err().unwrap();
    assert!(matches!(err, ClickUpError::Configuration { .. }));
    assert!(HttpClickUp::new("pk", "1", Some("not a url")).is_err());
}

#[test]
fn default_url_is_clickup() {
    init_crypto();
    let client = HttpClickUp::new("pk", "1", None).unwrap();
    assert_eq!(client.base_url(), "https://api.clickup.com/");
    assert_eq!(client.workspace_id(), "1");
}

#[test]
fn custom_task_ids_are_recognised() {
    assert!(is_custom_task_id("DEV-42"));
    assert!(is_custom_task_id("team_2-7"));
    assert!(!is_custom_task_id("86a1b2c3"));
    assert!(!is_custom_task_id("-42"));
    assert!(!is_custom_task_id("DEV-"));
    assert!(!is_custom_task_id("123-456"));
}

#[tokio::test]
async fn lists_spaces_with_auth_header() {
    let (client, fake) = start_fake(&[(
        "GET /api/v2/team/9000/space",
        200,
        json!({"spaces": [{"id": 7, "name": "Engineering"}]}),
    )])
    .await;

    let spaces = client.spaces().list(false).await.unwrap();
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0].id, "7");
    assert_eq!(spaces[0].name, "Engineering");

    let requests = fake.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].query, "archived=false");
    assert_eq!(requests[0].auth.as_deref(), Some("pk_test"));
}

#[tokio::test]
async fn members_come_from_the_configured_team() {
    let (client, _fake) = start_fake(&[(
        "GET /api/v2/team",
        200,
        json!({"teams": [
            {"id": "1", "members": [{"user": {"id": 1, "username": "other"}}]},
            {"id": "9000", "members": [{"user": {"id": 42, "username": "jane", "email": "jane@example.com"}}]}
        ]}),
    )])
    .await;

    let members = client.members().list().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "42");
    assert_eq!(members[0].email.as_deref(), Some("jane@example.com"));
}

#[tokio::test]
async fn task_search_forwards_array_filters() {
    let (client, fake) = start_fake(&[(
        "GET /api/v2/team/9000/task",
        200,
        json!({"tasks": [], "last_page": true}),
    )])
    .await;

    let query = TaskQuery {
        page: Some(2),
        statuses: vec!["open".to_string(), "review".to_string()],
        list_ids: vec!["55".to_string()],
        include_closed: Some(true),
        ..Default::default()
    };
    let page = client.tasks().search(&query).await.unwrap();
    assert!(page.tasks.is_empty());
    assert_eq!(page.last_page, Some(true));

    let query = &fake.requests()[0].query;
    assert!(query.contains("page=2"));
    assert!(query.contains("include_closed=true"));
    assert!(query.contains("statuses%5B%5D=open"));
    assert!(query.contains("statuses%5B%5D=review"));
    assert!(query.contains("list_ids%5B%5D=55"));
}

#[tokio::test]
async fn custom_task_ids_add_team_query() {
    let (client, fake) = start_fake(&[(
        "GET /api/v2/task/DEV-42",
        200,
        json!({"id": "abc", "custom_id": "DEV-42", "name": "Fix login"}),
    )])
    .await;

    let task = client.tasks().get("DEV-42", false).await.unwrap();
    assert_eq!(task.id, "abc");
    let query = &fake.requests()[0].query;
    assert!(query.contains("custom_task_ids=true"));
    assert!(query.contains("team_id=9000"));
}

#[tokio::test]
async fn update_sends_only_present_fields() {
    let (client, fake) = start_fake(&[(
        "PUT /api/v2/task/abc",
        200,
        json!({"id": "abc", "name": "Renamed"}),
    )])
    .await;

    let request = UpdateTaskRequest {
        name: Some("Renamed".to_string()),
        due_date: Some(None),
        ..Default::default()
    };
    client.tasks().update("abc", &request).await.unwrap();

    let body: Value = serde_json::from_str(&fake.requests()[0].body).unwrap();
    assert_eq!(body, json!({"name": "Renamed", "due_date": null}));
}

#[tokio::test]
async fn move_uses_home_list_endpoint_then_rereads() {
    let (client, fake) = start_fake(&[
        (
            "PUT /api/v3/workspaces/9000/tasks/abc/home_list/l2",
            200,
            json!({}),
        ),
        (
            "GET /api/v2/task/abc",
            200,
            json!({"id": "abc", "name": "Task", "list": {"id": "l2"}}),
        ),
    ])
    .await;

    let task = client.tasks().move_to_list("abc", "l2").await.unwrap();
    assert_eq!(task.list.unwrap().id, "l2");

    let paths: Vec<String> = fake.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/api/v3/workspaces/9000/tasks/abc/home_list/l2",
            "/api/v2/task/abc"
        ]
    );
}

#[tokio::test]
async fn tag_bodies_are_wrapped() {
    let (client, fake) = start_fake(&[("POST /api/v2/space/7/tag", 200, json!({}))]).await;

    let tag = client
        .tags()
        .create(
            "7",
            &CreateTagRequest {
                name: "urgent".to_string(),
                tag_fg: Some("#fff".to_string()),
                tag_bg: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(tag.name, "urgent");

    let body: Value = serde_json::from_str(&fake.requests()[0].body).unwrap();
    assert_eq!(body, json!({"tag": {"name": "urgent", "tag_fg": "#fff"}}));
}

#[tokio::test]
async fn no_running_timer_is_none() {
    let (client, _fake) = start_fake(&[(
        "GET /api/v2/team/9000/time_entries/current",
        200,
        json!({"data": null}),
    )])
    .await;

    assert!(client.time().current().await.unwrap().is_none());
}

#[tokio::test]
async fn error_bodies_become_api_errors() {
    let (client, _fake) = start_fake(&[(
        "GET /api/v2/space/1",
        401,
        json!({"err": "Token invalid", "ECODE": "OAUTH_025"}),
    )])
    .await;

    let err = client.spaces().get("1").await.unwrap_err();
    match err {
        ClickUpError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(code.as_deref(), Some("OAUTH_025"));
            assert_eq!(message, "Token invalid");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_is_accepted_for_deletes() {
    let (client, fake) = start_fake(&[("DELETE /api/v2/list/9", 200, json!({}))]).await;

    client.lists().delete("9").await.unwrap();
    assert_eq!(fake.requests()[0].method, "DELETE");
}

#[tokio::test]
async fn doc_page_listing_accepts_bare_arrays() {
    let (client, fake) = start_fake(&[(
        "GET /api/v3/workspaces/9000/docs/d1/pageListing",
        200,
        json!([{"id": "p1", "name": "Intro", "pages": [{"id": "p2", "name": "Child"}]}]),
    )])
    .await;

    let pages = client.docs().page_listing("d1", Some(2)).await.unwrap();
    assert_eq!(pages[0].id, "p1");
    assert_eq!(pages[0].pages[0].id, "p2");
    assert_eq!(fake.requests()[0].query, "max_page_depth=2");
}
