//! ClickUp backend error types.
//!
//! Every failure the backend client can produce is a `ClickUpError`. The MCP
//! layer treats all of them as service errors and surfaces the message as-is.

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ClickUpError {
    #[error("Failed to connect to the ClickUp API")]
    #[diagnostic(
        code(clickup_mcp::clickup::connection_failed),
        help("Check network access to api.clickup.com or the CLICKUP_API_URL override.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid ClickUp client configuration: {message}")]
    #[diagnostic(
        code(clickup_mcp::clickup::configuration),
        help("CLICKUP_API_URL must be an absolute http(s) URL such as https://api.clickup.com")
    )]
    Configuration { message: String },

    #[error("Invalid response from ClickUp: {message}")]
    #[diagnostic(code(clickup_mcp::clickup::invalid_response))]
    InvalidResponse { message: String },

    #[error("ClickUp API error ({status}): {message}")]
    #[diagnostic(code(clickup_mcp::clickup::api_error))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("{entity} not found: {reference}")]
    #[diagnostic(code(clickup_mcp::clickup::not_found))]
    NotFound { entity: String, reference: String },

    #[error("{count} {entity}s are named '{name}'; pass an id instead")]
    #[diagnostic(code(clickup_mcp::clickup::ambiguous))]
    Ambiguous {
        entity: String,
        name: String,
        count: usize,
    },
}

impl ClickUpError {
    pub fn not_found(entity: &str, reference: impl Into<String>) -> Self {
        ClickUpError::NotFound {
            entity: entity.to_string(),
            reference: reference.into(),
        }
    }

    /// Build an `Api` error from a non-success status and raw body.
    ///
    /// ClickUp error bodies look like `{"err": "...", "ECODE": "..."}`; anything
    /// else is kept verbatim as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            err: Option<String>,
            #[serde(rename = "ECODE")]
            ecode: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { err: Some(err), ecode }) => ClickUpError::Api {
                status,
                code: ecode,
                message: err,
            },
            _ => ClickUpError::Api {
                status,
                code: None,
                message: if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.to_string()
                },
            },
        }
    }
}

impl From<reqwest::Error> for ClickUpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClickUpError::ConnectionFailed { source: e }
        } else {
            ClickUpError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClickUpError {
    fn from(e: serde_json::Error) -> Self {
        ClickUpError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type ClickUpResult<T> = Result<T, ClickUpError>;
