//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jamcal_core::{CalendarTarget, OutputFormat, ParseZone, TracingOutputFormat};
use url::Url;

/// jamcal - "Add to calendar" links for game jam pages
#[derive(Debug, Parser)]
#[command(name = "jamcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "JAMCAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    // --- Output format flags ---
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Wrap links in terminal hyperlinks
    #[arg(long, global = true)]
    pub hyperlinks: bool,

    /// Maximum title length (truncated with ellipsis)
    #[arg(long, global = true)]
    pub max_title_length: Option<usize>,

    // --- Parsing flags ---
    /// Timezone for dates without an offset: "local", "utc" or "+HH:MM"
    #[arg(long, env = "JAMCAL_TIMEZONE", global = true)]
    pub timezone: Option<ParseZone>,

    /// Year assumed for dates written without one
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Event location
    #[arg(long, global = true)]
    pub location: Option<String>,

    // --- Action flags ---
    /// Open one of the calendar links once built
    #[arg(long, value_enum, global = true)]
    pub open: Option<OpenTarget>,

    /// Save the .ics file (to DIR, or the configured directory)
    #[arg(long, value_name = "DIR", global = true)]
    pub save_ics: Option<Option<PathBuf>>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }

    /// Returns whether any action flag is set.
    pub fn has_action(&self) -> bool {
        self.open.is_some() || self.save_ics.is_some()
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build calendar links from a "from <date> to <date>" sentence
    Text {
        /// The sentence holding the date range
        sentence: String,

        /// Event title
        #[arg(long, default_value = "Game Jam")]
        title: String,

        /// URL of the jam page, used in the description
        #[arg(long)]
        page_url: Option<Url>,
    },

    /// Build calendar links from a saved jam page
    Page {
        /// HTML file to read ("-" for stdin)
        #[arg(default_value = "-")]
        file: PathBuf,

        /// URL the page was saved from, used in the description
        #[arg(long)]
        page_url: Option<Url>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

/// Which link `--open` launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpenTarget {
    /// Google Calendar template page
    Google,
    /// Outlook compose page
    Outlook,
    /// The saved .ics file, with the system's calendar handler
    Ics,
}

impl From<OpenTarget> for CalendarTarget {
    fn from(target: OpenTarget) -> Self {
        match target {
            OpenTarget::Google => CalendarTarget::Google,
            OpenTarget::Outlook => CalendarTarget::Outlook,
            OpenTarget::Ics => CalendarTarget::IcsFile,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => TracingOutputFormat::Compact,
            LogFormat::Pretty => TracingOutputFormat::Pretty,
            LogFormat::Json => TracingOutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_text_command() {
        let cli = Cli::parse_from([
            "jamcal",
            "--timezone",
            "utc",
            "--year",
            "2025",
            "text",
            "from May 1 to May 2",
            "--title",
            "Spring Jam",
        ]);
        assert_eq!(cli.timezone, Some(ParseZone::Utc));
        assert_eq!(cli.year, Some(2025));
        assert_eq!(cli.output_format(), OutputFormat::Tty);
        assert!(!cli.has_action());
        match cli.command {
            Command::Text {
                sentence, title, ..
            } => {
                assert_eq!(sentence, "from May 1 to May 2");
                assert_eq!(title, "Spring Jam");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn page_defaults_to_stdin() {
        let cli = Cli::parse_from(["jamcal", "page", "--json"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        match cli.command {
            Command::Page { file, page_url } => {
                assert_eq!(file, PathBuf::from("-"));
                assert!(page_url.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn save_ics_value_is_optional() {
        let cli = Cli::parse_from(["jamcal", "text", "x", "--save-ics"]);
        assert_eq!(cli.save_ics, Some(None));
        assert!(cli.has_action());

        let cli = Cli::parse_from(["jamcal", "text", "x", "--save-ics", "/tmp/out"]);
        assert_eq!(cli.save_ics, Some(Some(PathBuf::from("/tmp/out"))));
    }

    #[test]
    fn open_target_maps_to_calendar_target() {
        let cli = Cli::parse_from(["jamcal", "text", "x", "--open", "outlook"]);
        assert_eq!(cli.open.map(CalendarTarget::from), Some(CalendarTarget::Outlook));
    }

    #[test]
    fn rejects_bad_timezone() {
        assert!(Cli::try_parse_from(["jamcal", "--timezone", "mars", "text", "x"]).is_err());
    }
}
