#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front end of dirindex. It answers one request
//! against a served root and prints the result: the bytes of a file, a text
//! listing, search matches as they are found, or an archive.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator together with handles for standard
//! output and error so tests can drive it without spawning a process. A
//! [`clap`](https://docs.rs/clap/) builder command performs the parse with
//! its own `--help` and `--version` handling; the request is then handed to
//! [`dirindex_core::Browser`]. Verbosity flags are applied through the
//! `logging` crate, which also installs the `tracing` subscriber.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit codes.
//! - Results go to standard output; diagnostics go to standard error.
//! - Search matches are flushed one at a time.
//!
//! # Errors
//!
//! Exit status `1` reports an input error (bad arguments, bad regex, unknown
//! archive format), `2` a missing path and `3` a filesystem or output
//! failure.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["dirindex", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("dirindex "));
//! assert!(stderr.is_empty());
//! ```

mod args;
mod error;
mod render;

pub use args::{PROGRAM_NAME, ParsedArgs, ROOT_ENV, parse_args};
pub use error::CliError;

use archive::CompressionLevel;
use dirindex_core::{Browser, BrowserConfig, RequestQuery, Response};
use logging::VerbosityConfig;
use std::ffi::OsString;
use std::io::Write;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

const HELP_TEXT: &str = concat!(
    "dirindex: browse, search and archive a directory tree\n",
    "\n",
    "Usage: dirindex [OPTIONS] [PATH]\n",
    "\n",
    "PATH is relative to the served root and defaults to '/'. A file is\n",
    "copied to standard output; a directory is listed, searched with\n",
    "--query, or archived with --dl.\n",
    "\n",
    "Options:\n",
    "      --root DIR       Directory to serve (default: $DIRINDEX_ROOT or '.').\n",
    "  -q, --query TEXT     Search for names containing TEXT (case-insensitive).\n",
    "      --regexp         Treat TEXT as a regular expression over relative paths.\n",
    "      --dl FORMAT      Write an archive of PATH; FORMAT is targz or zip.\n",
    "  -o, --output FILE    Write the archive to FILE instead of standard output.\n",
    "      --level N        Deflate level for the archive, 1 (fastest) to 9 (smallest).\n",
    "      --no-index-html  List directories even when they contain index.html.\n",
    "  -v, --verbose        Increase verbosity; may be repeated.\n",
    "      --info FLAGS     Informational output: archive, listing, search, serve.\n",
    "      --debug FLAGS    Debug output: archive, index, request, search, walk.\n",
    "  -h, --help           Show this help message and exit.\n",
    "  -V, --version        Output version information and exit.\n",
    "\n",
    "Exit status: 0 success, 1 invalid input, 2 not found, 3 failure.\n",
);

/// Runs the command line and returns the process exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments).map_err(CliError::from).and_then(|parsed| execute(parsed, stdout)) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}

/// Converts a status from [`run`] into a process exit code.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn execute<Out: Write>(parsed: ParsedArgs, stdout: &mut Out) -> Result<(), CliError> {
    if parsed.show_help {
        stdout.write_all(HELP_TEXT.as_bytes()).map_err(CliError::Output)?;
        return Ok(());
    }
    if parsed.show_version {
        writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")).map_err(CliError::Output)?;
        return Ok(());
    }

    logging::init_tracing(verbosity(&parsed)?);
    let level = match parsed.level {
        Some(level) => CompressionLevel::from_numeric(level)?,
        None => CompressionLevel::Default,
    };

    let config = BrowserConfig::new(parsed.resolved_root()).follow_index_html(!parsed.no_index_html);
    let query = RequestQuery {
        q: parsed.query.unwrap_or_default(),
        regexp: parsed.regexp,
        dl: parsed.download.unwrap_or_default(),
    };
    let response = match Browser::with_config(config).handle(&parsed.path, &query)? {
        Response::Archive(download) => Response::Archive(download.with_level(level)),
        other => other,
    };
    render::render(response, parsed.output.as_deref(), stdout)
}

fn verbosity(parsed: &ParsedArgs) -> Result<VerbosityConfig, CliError> {
    let mut config = VerbosityConfig::from_verbose_level(parsed.verbose);
    for token in &parsed.info {
        config.apply_info_flag(token).map_err(CliError::Verbosity)?;
    }
    for token in &parsed.debug {
        config.apply_debug_flag(token).map_err(CliError::Verbosity)?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests;
