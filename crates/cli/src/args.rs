use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable consulted when `--root` is absent.
pub const ROOT_ENV: &str = "DIRINDEX_ROOT";

/// Program name used when the argument vector is empty.
pub const PROGRAM_NAME: &str = "dirindex";

/// Command-line options after parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// `--help` was given.
    pub show_help: bool,
    /// `--version` was given.
    pub show_version: bool,
    /// Explicit `--root`.
    pub root: Option<PathBuf>,
    /// Request path below the root; `/` when omitted.
    pub path: String,
    /// `--query` text.
    pub query: Option<String>,
    /// `--regexp` was given.
    pub regexp: bool,
    /// `--dl` format name.
    pub download: Option<String>,
    /// `--output` destination for downloads.
    pub output: Option<PathBuf>,
    /// `--level` deflate level for downloads.
    pub level: Option<u32>,
    /// `--no-index-html` was given.
    pub no_index_html: bool,
    /// Number of `-v` occurrences.
    pub verbose: u8,
    /// `--info` tokens, comma lists already split.
    pub info: Vec<String>,
    /// `--debug` tokens, comma lists already split.
    pub debug: Vec<String>,
}

impl ParsedArgs {
    /// Served root: `--root`, else `$DIRINDEX_ROOT`, else the working
    /// directory.
    #[must_use]
    pub fn resolved_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| env_root(env::var_os(ROOT_ENV)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn env_root(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn clap_command() -> Command {
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
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .help("Directory to serve.")
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .short('q')
                .value_name("TEXT")
                .help("Search below PATH for names containing TEXT.")
                .conflicts_with("dl"),
        )
        .arg(
            Arg::new("regexp")
                .long("regexp")
                .help("Treat the query as a regular expression over relative paths.")
                .requires("query")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dl")
                .long("dl")
                .value_name("FORMAT")
                .help("Write an archive of PATH (targz or zip)."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write the archive to FILE instead of standard output.")
                .requires("dl")
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("N")
                .help("Deflate level for the archive, 1 (fastest) to 9 (smallest).")
                .requires("dl")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("no-index-html")
                .long("no-index-html")
                .help("List directories even when they contain index.html.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity; may be repeated.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .value_name("FLAGS")
                .help("Fine-grained informational verbosity.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Fine-grained debug verbosity.")
                .action(ArgAction::Append),
        )
        .arg(Arg::new("path").value_name("PATH"))
}

/// Parses an argument vector whose first element is the program name.
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

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        root: matches.remove_one::<OsString>("root").map(PathBuf::from),
        path: matches
            .remove_one::<String>("path")
            .unwrap_or_else(|| String::from("/")),
        query: matches.remove_one::<String>("query"),
        regexp: matches.get_flag("regexp"),
        download: matches.remove_one::<String>("dl"),
        output: matches.remove_one::<OsString>("output").map(PathBuf::from),
        level: matches.remove_one::<u32>("level"),
        no_index_html: matches.get_flag("no-index-html"),
        verbose: matches.get_count("verbose"),
        info: split_tokens(matches.remove_many::<String>("info")),
        debug: split_tokens(matches.remove_many::<String>("debug")),
    })
}

fn split_tokens(values: Option<clap::parser::Values<String>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .flat_map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}
