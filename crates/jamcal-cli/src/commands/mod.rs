//! Subcommand implementations.

pub mod augment;
pub mod config;
