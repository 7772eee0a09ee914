//! Commands that build calendar links for a jam.

use std::io::Read;
use std::path::{Path, PathBuf};

use jamcal_core::{Augmentation, JamPage, OutputFormatter, augment};
use tracing::{debug, error, warn};
use url::Url;

use crate::actions;
use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds links from a bare `from … to …` sentence.
pub fn text(
    sentence: &str,
    title: &str,
    page_url: Option<Url>,
    cli: &Cli,
    config: &ClientConfig,
) -> ClientResult<()> {
    let mut page = JamPage::from_text(sentence).with_title(title);
    if let Some(url) = page_url {
        page = page.with_page_url(url);
    }
    run(&page, cli, config)
}

/// Builds links from a saved jam page (`-` reads stdin).
pub fn page(file: &Path, page_url: Option<Url>, cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    let html = read_input(file)?;
    let page = JamPage::from_html(&html, page_url, &config.page)?;
    run(&page, cli, config)
}

/// Augments `page`, prints the result and runs the requested actions.
fn run(page: &JamPage, cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    let aug = build(page, config)?;

    let formatter = OutputFormatter::new(config.format_options());
    let rendered = formatter
        .render(&aug, cli.output_format())
        .map_err(|e| ClientError::Action(format!("failed to render output: {}", e)))?;
    println!("{}", rendered);

    let ics_dir = resolve_ics_dir(cli, config);
    let mut saved = None;
    if cli.save_ics.is_some() {
        let path = actions::save_ics(&aug, &ics_dir)?;
        if !cli.json {
            println!("saved: {}", path.display());
        }
        saved = Some(path);
    }

    if let Some(target) = cli.open {
        actions::open_target(&aug, target.into(), &ics_dir, saved.as_deref())?;
    }

    Ok(())
}

/// Directory given to `--save-ics`, else the configured one.
fn resolve_ics_dir(cli: &Cli, config: &ClientConfig) -> PathBuf {
    cli.save_ics
        .clone()
        .flatten()
        .unwrap_or_else(|| config.ics_dir())
}

/// Builds the augmentation for `page` with the configured parser and links.
pub fn build(page: &JamPage, config: &ClientConfig) -> ClientResult<Augmentation> {
    let parser = config.date_range_parser();
    let links = config.link_builder();

    match augment(page, &parser, &links, &config.event) {
        Ok(Some(aug)) => Ok(aug),
        Ok(None) => {
            warn!("no date range element found, nothing to add");
            Err(ClientError::NoDateRange)
        }
        Err(e) => {
            error!(
                error = %e,
                text = page.date_text.as_deref().unwrap_or_default(),
                "failed to parse jam dates"
            );
            Err(e.into())
        }
    }
}

fn read_input(file: &Path) -> ClientResult<String> {
    if file.as_os_str() == "-" {
        debug!("reading page from stdin");
        let mut html = String::new();
        std::io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        debug!(path = %file.display(), "reading page");
        Ok(std::fs::read_to_string(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamcal_core::{CalendarTarget, FormatError, ParseZone};

    fn config() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.parser.timezone = ParseZone::Utc;
        config.parser.reference_year = Some(2025);
        config
    }

    #[test]
    fn builds_from_sentence() {
        let page = JamPage::from_text("Submissions open from May 3rd at 6:00 PM to May 5th at 6:00 PM")
            .with_title("Spring Jam")
            .with_page_url(Url::parse("https://itch.io/jam/spring-jam").unwrap());

        let aug = build(&page, &config()).unwrap();
        assert_eq!(aug.payload.title(), "Spring Jam");
        assert_eq!(
            aug.payload.description(),
            "Game jam from https://itch.io/jam/spring-jam"
        );
        assert_eq!(aug.buttons.len(), 3);

        let google = aug.button(CalendarTarget::Google).unwrap().url().unwrap();
        assert!(
            google
                .as_str()
                .contains("dates=20250503T180000Z%2F20250505T180000Z")
        );
    }

    #[test]
    fn configured_location_is_used() {
        let mut config = config();
        config.event.location = "Discord".to_string();
        let page = JamPage::from_text("from May 3 2025 to May 5 2025").with_title("Jam");

        let aug = build(&page, &config).unwrap();
        assert_eq!(aug.payload.location(), "Discord");
    }

    #[test]
    fn page_without_dates_is_an_error() {
        let page = JamPage::default();
        assert!(matches!(
            build(&page, &config()),
            Err(ClientError::NoDateRange)
        ));
    }

    #[test]
    fn unparseable_dates_are_reported() {
        let page = JamPage::from_text("Starts soon, stay tuned").with_title("Jam");
        assert!(matches!(
            build(&page, &config()),
            Err(ClientError::Format(FormatError::RangeNotFound))
        ));
    }

    #[test]
    fn save_and_open_share_one_directory() {
        use clap::Parser;

        let mut config = config();
        config.output.ics_dir = Some(PathBuf::from("/tmp/configured"));

        let cli = Cli::parse_from(["jamcal", "text", "x", "--open", "ics", "--save-ics", "/tmp/jams"]);
        assert_eq!(resolve_ics_dir(&cli, &config), PathBuf::from("/tmp/jams"));

        let cli = Cli::parse_from(["jamcal", "text", "x", "--open", "ics", "--save-ics"]);
        assert_eq!(resolve_ics_dir(&cli, &config), PathBuf::from("/tmp/configured"));

        let cli = Cli::parse_from(["jamcal", "text", "x", "--open", "ics"]);
        assert_eq!(resolve_ics_dir(&cli, &config), PathBuf::from("/tmp/configured"));
    }

    #[test]
    fn reads_page_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jam.html");
        std::fs::write(&path, "<html><title>Jam</title></html>").unwrap();
        assert_eq!(read_input(&path).unwrap(), "<html><title>Jam</title></html>");
        assert!(read_input(&dir.path().join("missing.html")).is_err());
    }
}
