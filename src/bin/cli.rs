//! Command-line front end for the demo workload.
//!
//! The demo drives a handful of call sites through the process-wide registry
//! so the threshold, pattern directives and shutdown report can be observed
//! from a shell. Log lines go to standard error; the final summary is printed
//! on standard output.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use sitelog::{LogConfig, PatternDirective, Severity, Summary, sitelog};

const PROGRAM_NAME: &str = "sitelog-demo";

const HELP_TEXT: &str = "\
Usage: sitelog-demo [OPTIONS]

Runs a small simulated workload through the sitelog call-site registry.

Options:
  -l, --level <LEVEL>     Threshold: name, marker letter or rank 0-7 (default: notice)
      --enable <REGEX>    Enable call sites matching REGEX after the first round
      --disable <REGEX>   Disable call sites matching REGEX after the first round
  -r, --rounds <N>        Number of workload rounds (default: 3)
  -q, --quiet             Suppress the shutdown report line
      --trace-internals   Print the registry's own tracing events
  -h, --help              Show this help message and exit.
  -V, --version           Output version information and exit.

Environment variables SITELOG_LEVEL, SITELOG_QUIET, SITELOG_PATTERNS and
SITELOG_INVALID_MARKER provide defaults that options override.
";

/// Options collected from the command line.
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    level: Option<String>,
    directives: Vec<PatternDirective>,
    rounds: u32,
    quiet: bool,
    trace_internals: bool,
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
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Threshold as a name, marker letter or rank.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("enable")
                .long("enable")
                .value_name("REGEX")
                .help("Enable call sites whose template matches REGEX.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("disable")
                .long("disable")
                .value_name("REGEX")
                .help("Disable call sites whose template matches REGEX.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("rounds")
                .long("rounds")
                .short('r')
                .value_name("N")
                .help("Number of workload rounds.")
                .value_parser(clap::value_parser!(u32))
                .default_value("3")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Suppress the shutdown report line.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace-internals")
                .long("trace-internals")
                .help("Print the registry's own tracing events.")
                .action(ArgAction::SetTrue),
        )
}

fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    // clap keeps per-option order only, so enables apply before disables.
    let mut directives: Vec<PatternDirective> = matches
        .remove_many::<String>("enable")
        .map(|values| values.map(PatternDirective::enable).collect())
        .unwrap_or_default();
    if let Some(values) = matches.remove_many::<String>("disable") {
        directives.extend(values.map(PatternDirective::disable));
    }

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        level: matches.remove_one::<String>("level"),
        directives,
        rounds: matches.remove_one::<u32>("rounds").unwrap_or(3),
        quiet: matches.get_flag("quiet"),
        trace_internals: matches.get_flag("trace-internals"),
    })
}

/// Parses `args`, runs the workload and writes the summary to `stdout`.
#[must_use]
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(error) => {
            let _ = write!(stderr, "{PROGRAM_NAME}: {error}");
            return ExitCode::FAILURE;
        }
    };

    if parsed.show_help {
        let _ = stdout.write_all(HELP_TEXT.as_bytes());
        return ExitCode::SUCCESS;
    }
    if parsed.show_version {
        let _ = writeln!(stdout, "{PROGRAM_NAME} {}", sitelog::VERSION);
        return ExitCode::SUCCESS;
    }

    match run(&parsed) {
        Ok(summary) => {
            let _ = writeln!(stdout, "{summary}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(parsed: &ParsedArgs) -> Result<Summary, String> {
    if parsed.trace_internals {
        install_tracing();
    }

    let mut config = LogConfig::from_env().map_err(|error| error.to_string())?;
    if let Some(level) = &parsed.level {
        config.level = level
            .parse::<Severity>()
            .map_err(|error| error.to_string())?;
    }
    config.quiet |= parsed.quiet;

    // Directives only reach registered call sites, so they wait for round one.
    let directives = std::mem::take(&mut config.directives);
    let session = sitelog::init(&config).map_err(|error| error.to_string())?;
    let registry = session.registry();

    for round in 1..=parsed.rounds {
        workload(round);
        if round == 1 {
            registry
                .apply_directives(directives.iter().chain(&parsed.directives))
                .map_err(|error| error.to_string())?;
        }
    }

    Ok(session.finish())
}

fn workload(round: u32) {
    sitelog!("N: round {} started", round);
    for job in 0..3 {
        sitelog!("D: trace job {} of round {}", job, round);
        if job == 2 && round % 2 == 0 {
            sitelog!("W: job {} of round {} retried", job, round);
        }
    }
    sitelog!("I: round {} finished", round);
}

#[cfg(feature = "tracing")]
fn install_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("sitelog=trace"))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
fn install_tracing() {}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_demo(args: &[&str]) -> (ExitCode, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(
            std::iter::once(PROGRAM_NAME).chain(args.iter().copied()),
            &mut stdout,
            &mut stderr,
        );
        (
            exit,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn version_flag_reports_success() {
        let (exit, stdout, stderr) = run_demo(&["--version"]);
        assert_eq!(exit, ExitCode::SUCCESS);
        assert_eq!(stdout, format!("sitelog-demo {}\n", sitelog::VERSION));
        assert!(stderr.is_empty());
    }

    #[test]
    fn help_flag_prints_usage() {
        let (exit, stdout, _) = run_demo(&["-h"]);
        assert_eq!(exit, ExitCode::SUCCESS);
        assert!(stdout.starts_with("Usage: sitelog-demo"));
    }

    #[test]
    fn unknown_flag_reports_failure() {
        let (exit, stdout, stderr) = run_demo(&["--definitely-invalid-option"]);
        assert_eq!(exit, ExitCode::FAILURE);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("sitelog-demo:"));
    }

    #[test]
    fn invalid_level_reports_failure() {
        let (exit, stdout, stderr) = run_demo(&["--level", "chatty"]);
        assert_eq!(exit, ExitCode::FAILURE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("unknown severity level 'chatty'"));
    }

    #[test]
    fn workload_prints_summary() {
        let (exit, stdout, _) = run_demo(&["--rounds", "2", "--quiet", "--enable", "trace"]);
        assert_eq!(exit, ExitCode::SUCCESS);
        assert!(stdout.starts_with("level = "), "{stdout}");
        assert!(stdout.contains("n_entries = "));
    }

    #[test]
    fn parse_args_collects_directives() {
        let parsed = parse_args([PROGRAM_NAME, "--enable", "a", "--disable", "b", "--enable", "c"])
            .unwrap();
        assert_eq!(
            parsed.directives,
            [
                PatternDirective::enable("a"),
                PatternDirective::enable("c"),
                PatternDirective::disable("b"),
            ]
        );
        assert_eq!(parsed.rounds, 3);
    }
}
