//! CLI, configuration, output rendering, actions
//!
//! This crate provides the `jamcal` command-line interface.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
