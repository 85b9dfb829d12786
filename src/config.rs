//! Server configuration
//!
//! Every setting comes from a command-line flag or, failing that, an
//! environment variable. [`ConfigArgs`] holds the raw values as parsed by
//! clap; [`ConfigArgs::resolve`] checks them and produces a [`Config`].

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use clap::Args;
use miette::Diagnostic;
use thiserror::Error;

use crate::clickup::DEFAULT_API_URL;
use crate::mcp::ToolFilter;

/// Legacy name of `DISABLED_TOOLS`.
const DISABLED_COMMANDS_ENV: &str = "DISABLED_COMMANDS";

pub const DEFAULT_PORT: u16 = 3231;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("ClickUp API key is not set")]
    #[diagnostic(
        code(clickup_mcp::config::missing_api_key),
        help("Pass --api-key or set CLICKUP_API_KEY to a personal token (pk_...)")
    )]
    MissingApiKey,

    #[error("ClickUp workspace id is not set")]
    #[diagnostic(
        code(clickup_mcp::config::missing_team_id),
        help("Pass --team-id or set CLICKUP_TEAM_ID; it is the number after app.clickup.com/ in the web UI")
    )]
    MissingTeamId,

    #[error("Unknown transport '{value}'")]
    #[diagnostic(
        code(clickup_mcp::config::transport),
        help("Use 'stdio' or 'http'")
    )]
    InvalidTransport { value: String },

    #[error("'{value}' is not a boolean")]
    #[diagnostic(
        code(clickup_mcp::config::boolean),
        help("Use true/false, 1/0, yes/no or on/off")
    )]
    InvalidBool { value: String },
}

/// How the server talks to its client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Stdio,
    Http,
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" | "streamable-http" => Ok(Transport::Http),
            _ => Err(ConfigError::InvalidTransport {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stdio => f.write_str("stdio"),
            Transport::Http => f.write_str("http"),
        }
    }
}

/// Parse `true/false/1/0/yes/no/on/off`, case-insensitively.
pub fn parse_bool_like(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            value: value.to_string(),
        }),
    }
}

/// Split a comma separated list, dropping blanks.
pub fn parse_tool_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw settings as given on the command line or in the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// ClickUp personal API token
    #[arg(long, env = "CLICKUP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// ClickUp workspace (team) id
    #[arg(long, env = "CLICKUP_TEAM_ID")]
    pub team_id: Option<String>,

    /// Expose the document tools
    #[arg(
        long,
        env = "DOCUMENT_SUPPORT",
        value_parser = parse_bool_like,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub document_support: Option<bool>,

    /// Comma separated tool names to hide (also read from DISABLED_COMMANDS)
    #[arg(long, env = "DISABLED_TOOLS")]
    pub disabled_tools: Option<String>,

    /// stdio or http
    #[arg(long, env = "CLICKUP_MCP_TRANSPORT", value_parser = Transport::from_str)]
    pub transport: Option<Transport>,

    /// Address the HTTP transport binds to
    #[arg(long, env = "CLICKUP_MCP_HOST")]
    pub host: Option<IpAddr>,

    /// Port the HTTP transport listens on
    #[arg(long, env = "CLICKUP_MCP_PORT")]
    pub port: Option<u16>,

    /// ClickUp API origin
    #[arg(long, env = "CLICKUP_API_URL")]
    pub api_url: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ConfigArgs {
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let api_key = present(self.api_key).ok_or(ConfigError::MissingApiKey)?;
        let team_id = present(self.team_id).ok_or(ConfigError::MissingTeamId)?;
        let disabled = present(self.disabled_tools)
            .or_else(|| present(env::var(DISABLED_COMMANDS_ENV).ok()))
            .map(|list| parse_tool_list(&list))
            .unwrap_or_default();

        Ok(Config {
            api_key,
            team_id,
            api_url: present(self.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            document_support: self.document_support.unwrap_or(false),
            disabled_tools: disabled,
            transport: self.transport.unwrap_or_default(),
            host: self.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: self.port.unwrap_or(DEFAULT_PORT),
        })
    }
}

/// Validated server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub team_id: String,
    pub api_url: String,
    pub document_support: bool,
    pub disabled_tools: Vec<String>,
    pub transport: Transport,
    pub host: IpAddr,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("team_id", &self.team_id)
            .field("api_url", &self.api_url)
            .field("document_support", &self.document_support)
            .field("disabled_tools", &self.disabled_tools)
            .field("transport", &self.transport)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    pub fn tool_filter(&self) -> ToolFilter {
        ToolFilter::new(self.disabled_tools.iter().cloned(), self.document_support)
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
