//! ClickUp backend: resource traits, models, and the HTTP client.

mod api;
mod client;
mod error;
pub mod models;
mod resolve;

#[cfg(test)]
pub(crate) mod memory;

#[cfg(test)]
mod client_test;

pub use api::{
    ClickUpApi, DocApi, FolderApi, ListApi, MemberApi, SpaceApi, TagApi, TaskApi, TimeApi,
};
pub use client::{DEFAULT_API_URL, HttpClickUp, is_custom_task_id};
pub use error::{ClickUpError, ClickUpResult};
pub use resolve::find_unique_by_name;
