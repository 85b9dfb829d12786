pub mod error;


use std::sync::Arc;

use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clickup::HttpClickUp;
use crate::config::{ConfigArgs, Transport};
use crate::mcp::{Dispatcher, ToolContext, default_registry, serve_http, serve_stdio};

use error::CliResult;

#[derive(Parser, Debug)]
#[command(name = "clickup-mcp")]
#[command(author, version, about = "MCP server for ClickUp", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "clickup_mcp=info",
        1 => "clickup_mcp=debug,rmcp=info,tower_http=debug",
        _ => "clickup_mcp=trace,rmcp=debug,tower_http=trace",
    }
}

/// Logs go to stderr; stdout carries the stdio transport.
fn init_tracing(verbose: u8) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.resolve()?;
    info!(
        team_id = %config.team_id,
        transport = %config.transport,
        document_support = config.document_support,
        disabled = config.disabled_tools.len(),
        "starting clickup-mcp"
    );

    let _ = rustls::crypto::ring::default_provider().install_default();
    let api = HttpClickUp::new(
        config.api_key.clone(),
        config.team_id.clone(),
        Some(config.api_url.as_str()),
    )?;

    let context = ToolContext::new(Arc::new(api));
    let dispatcher = Arc::new(Dispatcher::new(
        default_registry(),
        config.tool_filter(),
        context,
    ));

    match config.transport {
        Transport::Stdio => serve_stdio(dispatcher).await?,
        Transport::Http => serve_http(dispatcher, config.http_addr()).await?,
    }
    Ok(())
}
