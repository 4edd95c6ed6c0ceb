#![deny(unsafe_code)]

//! Command-line driver for the diagnostic reporting facility.
//!
//! The numerical pipeline links the reporter directly; this binary exposes
//! the same entry points to operators for smoke checks and to the
//! integration suite, which asserts process exit codes and stream bytes
//! against a real process.

use std::env;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use mimalloc::MiMalloc;

use core::exit_code::ExitCode;
use logging::{Reporter, ReporterConfig, fatal};

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: ephem-diag [--debug] [--log-file <path>] <command> [args...]

commands:
  report <msg>                        print <msg> on stdout
  warning <msg>                       print `Warning: <msg>` on stderr
  error <msg>                         print `Error: <msg>` on stderr
  fatal <msg>                         report <msg> fatally and exit 1
  read-check <file> <size> <count>    read <count> elements of <size> bytes";

// Hand-rolled rather than derived: crates that depend on the workspace
// `core` package cannot use thiserror, whose expansion references
// `::core::fmt` and resolves to the wrong crate.
#[derive(Debug)]
enum UsageError {
    UnknownOption(String),
    MissingValue(&'static str),
    MissingCommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption(option) => write!(f, "unknown option: {option}"),
            Self::MissingValue(option) => write!(f, "missing value for {option}"),
            Self::MissingCommand => write!(f, "missing command"),
            Self::UnknownCommand(command) => write!(f, "unknown command: {command}"),
            Self::MissingArgument(what) => write!(f, "missing argument for {what}"),
            Self::InvalidNumber(raw) => write!(f, "invalid number: {raw}"),
        }
    }
}

impl std::error::Error for UsageError {}

enum Command {
    Report(String),
    Warning(String),
    Error(String),
    Fatal(String),
    ReadCheck {
        path: PathBuf,
        element_size: usize,
        element_count: usize,
    },
}

struct Invocation {
    config: ReporterConfig,
    command: Command,
}

fn main() -> ProcessExitCode {
    match parse(env::args().skip(1)) {
        Ok(invocation) => run(invocation).into(),
        Err(usage) => {
            eprintln!("ephem-diag: {usage}");
            eprintln!("{USAGE}");
            ExitCode::Fatal.into()
        }
    }
}

fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Invocation, UsageError> {
    let mut config = ReporterConfig::default();

    let command = loop {
        let arg = args.next().ok_or(UsageError::MissingCommand)?;
        match arg.as_str() {
            "--debug" => config.debug = true,
            "--log-file" => {
                let path = args.next().ok_or(UsageError::MissingValue("--log-file"))?;
                config.log_file = Some(PathBuf::from(path));
            }
            option if option.starts_with("--") => {
                return Err(UsageError::UnknownOption(option.to_owned()));
            }
            _ => break arg,
        }
    };

    let command = match command.as_str() {
        "report" => Command::Report(message_argument(&mut args)?),
        "warning" => Command::Warning(message_argument(&mut args)?),
        "error" => Command::Error(message_argument(&mut args)?),
        "fatal" => Command::Fatal(message_argument(&mut args)?),
        "read-check" => {
            let path = args
                .next()
                .ok_or(UsageError::MissingArgument("read-check <file>"))?;
            let element_size = number_argument(&mut args, "read-check <size>")?;
            let element_count = number_argument(&mut args, "read-check <count>")?;
            Command::ReadCheck {
                path: PathBuf::from(path),
                element_size,
                element_count,
            }
        }
        other => return Err(UsageError::UnknownCommand(other.to_owned())),
    };

    Ok(Invocation { config, command })
}

fn message_argument<I: Iterator<Item = String>>(args: &mut I) -> Result<String, UsageError> {
    args.next().ok_or(UsageError::MissingArgument("<msg>"))
}

fn number_argument<I: Iterator<Item = String>>(
    args: &mut I,
    what: &'static str,
) -> Result<usize, UsageError> {
    let raw = args.next().ok_or(UsageError::MissingArgument(what))?;
    raw.parse().map_err(|_| UsageError::InvalidNumber(raw))
}

fn run(invocation: Invocation) -> ExitCode {
    let mut reporter = Reporter::new(invocation.config);

    match invocation.command {
        Command::Report(msg) => reporter.report(&msg),
        Command::Warning(msg) => reporter.warning(&msg),
        Command::Error(msg) => reporter.error(&msg),
        Command::Fatal(msg) => fatal!(reporter, "{msg}"),
        Command::ReadCheck {
            path,
            element_size,
            element_count,
        } => {
            let Ok(mut file) = File::open(&path) else {
                fatal!(reporter, "Could not open input file {}.", path.display())
            };
            let bytes =
                strict_io::read_elements(&mut reporter, &mut file, element_size, element_count);
            reporter.report(&format!("read {} bytes", bytes.len()));
        }
    }

    ExitCode::Ok
}
