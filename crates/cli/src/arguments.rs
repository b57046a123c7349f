//! crates/cli/src/arguments.rs
//! Command-line parsing for `applog`.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use logging::Severity;

/// Program name used when the argument list is empty.
pub const PROGRAM_NAME: &str = "applog";

/// Options recognised on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// `--help` was given.
    pub show_help: bool,
    /// `--version` was given.
    pub show_version: bool,
    /// Minimum severity shown on the display.
    pub threshold: Severity,
    /// Severity used for the message or for each stdin line.
    pub severity: Severity,
    /// Journal destination in resolver syntax.
    pub journal: String,
    /// Label prepended to each stdin line.
    pub label: String,
    /// Task wrapped around the whole run.
    pub task: Option<String>,
    /// Route warnings and failures to stderr.
    pub split: bool,
    /// Enable the debug channel and tracing diagnostics.
    pub debug: bool,
    /// Suppress the task spinner.
    pub no_spinner: bool,
    /// Message words; stdin is read when empty.
    pub message: Vec<String>,
}

impl ParsedArgs {
    /// Joins the message words, or returns `None` when stdin should be read.
    pub fn message_text(&self) -> Option<String> {
        (!self.message.is_empty()).then(|| self.message.join(" "))
    }
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('t')
                .value_name("LEVEL")
                .help("Minimum severity shown on the display.")
                .default_value("user")
                .value_parser(clap::value_parser!(Severity)),
        )
        .arg(
            Arg::new("severity")
                .long("severity")
                .short('s')
                .value_name("LEVEL")
                .help("Severity of the message or of each stdin line.")
                .default_value("user")
                .value_parser(clap::value_parser!(Severity)),
        )
        .arg(
            Arg::new("journal")
                .long("journal")
                .short('j')
                .value_name("TARGET")
                .help("Journal destination: stdout, stderr, or a file path.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("label")
                .long("label")
                .short('l')
                .value_name("TEXT")
                .help("Label prepended to each line read from stdin.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("task")
                .long("task")
                .value_name("TEXT")
                .help("Run everything inside a task named TEXT.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("split")
                .long("split")
                .help("Send warnings and failures to stderr.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug tracing of applog itself.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-spinner")
                .long("no-spinner")
                .help("Never draw the task spinner.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("message")
                .action(ArgAction::Append)
                .num_args(0..)
                .trailing_var_arg(true)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let threshold = matches
        .remove_one::<Severity>("threshold")
        .unwrap_or_default();
    let severity = matches.remove_one::<Severity>("severity").unwrap_or_default();
    let journal = matches.remove_one::<String>("journal").unwrap_or_default();
    let label = matches.remove_one::<String>("label").unwrap_or_default();
    let task = matches.remove_one::<String>("task");
    let message = matches
        .remove_many::<OsString>("message")
        .map(|values| {
            values
                .map(|value| value.to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        threshold,
        severity,
        journal,
        label,
        task,
        split: matches.get_flag("split"),
        debug: matches.get_flag("debug"),
        no_spinner: matches.get_flag("no-spinner"),
        message,
    })
}
