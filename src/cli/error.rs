use miette::Diagnostic;
use thiserror::Error;

use crate::clickup::ClickUpError;
use crate::config::ConfigError;
use crate::mcp::TransportError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClickUpError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}

pub type CliResult<T> = Result<T, CliError>;
