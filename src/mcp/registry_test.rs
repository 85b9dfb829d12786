//! Tests for the tool registry and enable filter

use serde_json::{Value, json};

use super::registry::{ToolFamily, ToolFilter, input_schema};
use super::tools::{NoParams, default_registry};

const CATALOG: &[(ToolFamily, &[&str])] = &[
    (
        ToolFamily::Workspace,
        &["get_workspace_hierarchy", "get_workspace_tasks"],
    ),
    (
        ToolFamily::Member,
        &[
            "get_workspace_members",
            "find_member_by_name",
            "resolve_assignees",
        ],
    ),
    (
        ToolFamily::Space,
        &[
            "get_spaces",
            "get_space",
            "create_space",
            "update_space",
            "delete_space",
        ],
    ),
    (
        ToolFamily::Folder,
        &["create_folder", "get_folder", "update_folder", "delete_folder"],
    ),
    (
        ToolFamily::List,
        &[
            "create_list",
            "create_list_in_folder",
            "get_list",
            "update_list",
            "delete_list",
        ],
    ),
    (
        ToolFamily::Task,
        &[
            "create_task",
            "get_task",
            "get_tasks",
            "update_task",
            "move_task",
            "duplicate_task",
            "delete_task",
            "get_task_comments",
            "create_task_comment",
        ],
    ),
    (
        ToolFamily::Bulk,
        &[
            "create_bulk_tasks",
            "update_bulk_tasks",
            "move_bulk_tasks",
            "delete_bulk_tasks",
        ],
    ),
    (
        ToolFamily::Tag,
        &[
            "get_space_tags",
            "create_space_tag",
            "update_space_tag",
            "delete_space_tag",
            "add_tag_to_task",
            "remove_tag_from_task",
        ],
    ),
    (
        ToolFamily::Time,
        &[
            "get_task_time_entries",
            "start_time_tracking",
            "stop_time_tracking",
            "add_time_entry",
            "delete_time_entry",
            "get_current_time_entry",
        ],
    ),
    (
        ToolFamily::Document,
        &[
            "create_document",
            "get_document",
            "list_documents",
            "list_document_pages",
            "get_document_pages",
            "create_document_page",
            "update_document_page",
        ],
    ),
];

#[test]
fn every_catalog_tool_is_registered_in_its_family() {
    let registry = default_registry();

    let mut expected = 0;
    for (family, names) in CATALOG {
        for name in *names {
            let entry = registry
                .get(name)
                .unwrap_or_else(|| panic!("{name} is not registered"));
            assert_eq!(entry.descriptor.family, *family, "{name}");
            expected += 1;
        }
    }
    assert_eq!(registry.len(), expected);
    assert_eq!(registry.len(), 51);
}

#[test]
fn names_are_sorted() {
    let names = default_registry().names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn every_descriptor_has_object_schema_and_description() {
    let registry = default_registry();
    for descriptor in registry.descriptors() {
        assert!(!descriptor.description.is_empty(), "{}", descriptor.name);
        assert_eq!(
            descriptor.input_schema.get("type"),
            Some(&json!("object")),
            "{}",
            descriptor.name
        );
        assert!(!descriptor.input_schema.contains_key("$schema"));
    }
}

#[test]
fn schema_uses_wire_names() {
    let registry = default_registry();
    let properties = |name: &str| -> Value {
        registry.get(name).unwrap().descriptor.input_schema["properties"].clone()
    };

    let space = properties("update_space");
    assert!(space.get("space_id").is_some());
    assert!(space.get("space_name").is_some());

    let task = properties("update_task");
    assert!(task.get("taskId").is_some());
    assert!(task.get("listName").is_some());
    assert!(task.get("dueDate").is_some());
    assert!(task.get("markdown_description").is_some());
}

#[test]
fn no_params_schema_is_an_empty_object() {
    let schema = input_schema::<NoParams>();
    assert_eq!(schema.get("type"), Some(&json!("object")));
    assert!(schema.get("required").is_none());
}

#[test]
fn filter_hides_disabled_names_and_documents() {
    let registry = default_registry();
    let filter = ToolFilter::new(["delete_task", " "], false);

    let delete_task = &registry.get("delete_task").unwrap().descriptor;
    let get_task = &registry.get("get_task").unwrap().descriptor;
    let get_document = &registry.get("get_document").unwrap().descriptor;

    assert!(!filter.is_enabled(delete_task));
    assert!(filter.is_enabled(get_task));
    assert!(!filter.is_enabled(get_document));

    assert!(ToolFilter::allow_all().is_enabled(get_document));
}
