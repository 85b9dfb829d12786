pub mod cli;
pub mod clickup;
pub mod config;
pub mod mcp;
pub mod serde_utils;
