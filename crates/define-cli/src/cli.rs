//! Command-line arguments for `define-inspect`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use define_cli::logging::LogFormat;
use define_xml::DEFAULT_ENCODING;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "define-inspect",
    version,
    about = "Inspect dataset, variable, and codelist metadata in Define-XML files",
    long_about = "Inspect Define-XML 2.0 and 2.1 documents.\n\n\
                  Every listing parses the whole document and checks all\n\
                  cross-references before printing anything."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List datasets (ItemGroupDef).
    Datasets(ListArgs),

    /// List variables per dataset, in dataset order.
    Vars(ListArgs),

    /// List codelists and their kind.
    Codelists(ListArgs),

    /// List coded values and external dictionaries.
    Codes(CodesArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Define-XML file to read.
    #[arg(value_name = "DEFINE_XML")]
    pub file: PathBuf,

    /// Character encoding of the file (WHATWG label).
    #[arg(long = "encoding", default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Language tag used when a description has several translations.
    #[arg(long = "lang", value_name = "TAG")]
    pub lang: Option<String>,

    /// Case-insensitive regex on dataset or codelist names, e.g. '^(ae|cm|lb)$'.
    #[arg(long = "filter", value_name = "REGEX")]
    pub filter: Option<String>,

    /// Show the extended attribute set.
    #[arg(short = 'e', long = "extended")]
    pub extended: bool,
}

#[derive(Args)]
pub struct CodesArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Do not print external codelists.
    #[arg(long = "hide-external", conflicts_with = "only_external")]
    pub hide_external: bool,

    /// Print only external codelists.
    #[arg(long = "only-external")]
    pub only_external: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_flags_are_exclusive() {
        let result = Cli::try_parse_from([
            "define-inspect",
            "codes",
            "define.xml",
            "--hide-external",
            "--only-external",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn encoding_defaults_to_utf8() {
        let cli = Cli::try_parse_from(["define-inspect", "vars", "define.xml", "--filter", "^ae$"])
            .expect("parse args");
        let Command::Vars(args) = cli.command else {
            panic!("expected vars command");
        };
        assert_eq!(args.encoding, "UTF-8");
        assert_eq!(args.filter.as_deref(), Some("^ae$"));
        assert!(!args.extended);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
