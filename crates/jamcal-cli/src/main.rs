//! jamcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use jamcal_cli::cli::{Cli, Command, ConfigAction};
use jamcal_cli::commands;
use jamcal_cli::config::ClientConfig;
use jamcal_cli::error::{ClientError, ClientResult};
use jamcal_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first so `debug = true` reaches the logger
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.tracing_config(cli.log_format.into())) {
        eprintln!("warning: {}", e);
    }

    // Run the command
    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    let mut config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    }
    .map_err(ClientError::Config)?;
    config.apply_cli(cli);
    Ok(config)
}

fn run(cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    match cli.command {
        Command::Text {
            ref sentence,
            ref title,
            ref page_url,
        } => commands::augment::text(sentence, title, page_url.clone(), cli, config),
        Command::Page {
            ref file,
            ref page_url,
        } => commands::augment::page(file, page_url.clone(), cli, config),
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(config),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
