//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config
        .page
        .validate()
        .map_err(|e| ClientError::Config(e.to_string()))?;

    if !config.event.description_template.contains("{url}") {
        println!("Note: description_template has no {{url}} placeholder.");
    }

    if let Some(year) = config.parser.reference_year {
        if !(1..=9999).contains(&year) {
            return Err(ClientError::Config(format!(
                "reference_year {} is out of range",
                year
            )));
        }
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}
