//! Top-level application orchestration.
//!
//! `src/main.rs` and the preset binaries are intentionally tiny; this module
//! is the "real main" that:
//! - parses CLI arguments
//! - picks a series source (BLS API or snapshot file)
//! - runs the change pipeline
//! - writes the result to stdout in one piece

use std::io;

use clap::Parser;

use crate::cli::{ChangesArgs, Command, PresetArgs, SeriesArgs, SourceArgs};
use crate::data::{BlsClient, FileSource, SeriesSource};
use crate::domain::{ChangeConfig, OutputFormat, Rounding, ShortHistoryPolicy};
use crate::error::AppError;

pub mod pipeline;

pub use pipeline::Preset;

/// Entry point for the `cpi` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // `cpi` on its own behaves like `cpi month-to-month`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::MonthToMonth(args) => handle_preset(Preset::MonthToMonth, args),
        Command::YearOverYear(args) => handle_preset(Preset::YearOverYear, args),
        Command::Changes(args) => handle_changes(args),
        Command::Series(args) => handle_series(args),
    }
}

/// Entry point for the zero-argument preset binaries.
pub fn run_preset(preset: Preset) -> Result<(), AppError> {
    init_logging();

    let source = BlsClient::from_env()?;
    let records = pipeline::run_preset(&source, preset, Rounding::default())?;
    crate::io::write_records(&mut io::stdout().lock(), &records, OutputFormat::Json)
}

/// Logs go to stderr; stdout carries only the report. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();
}

fn handle_preset(preset: Preset, args: PresetArgs) -> Result<(), AppError> {
    let source = open_source(&args.source)?;
    let records = pipeline::run_preset(source.as_ref(), preset, args.rounding)?;
    crate::io::write_records(&mut io::stdout().lock(), &records, args.format)
}

fn handle_changes(args: ChangesArgs) -> Result<(), AppError> {
    let source = open_source(&args.source)?;
    let config = change_config_from_args(&args);
    let records = pipeline::run_changes(source.as_ref(), &args.selector.selectors(), &config)?;
    crate::io::write_records(&mut io::stdout().lock(), &records, args.format)
}

fn handle_series(args: SeriesArgs) -> Result<(), AppError> {
    let source = open_source(&args.source)?;
    let observations = pipeline::fetch_observations(source.as_ref(), &args.selector.selectors(), args.monthly_only)?;
    crate::io::write_observations(&mut io::stdout().lock(), &observations)
}

fn open_source(args: &SourceArgs) -> Result<Box<dyn SeriesSource>, AppError> {
    match &args.input {
        Some(path) => Ok(Box::new(FileSource::open(path)?)),
        None => Ok(Box::new(BlsClient::from_env()?.with_lookback_years(args.lookback_years)?)),
    }
}

pub fn change_config_from_args(args: &ChangesArgs) -> ChangeConfig {
    ChangeConfig {
        lag: args.lag,
        window: args.window,
        rounding: args.rounding,
        short_history: if args.strict {
            ShortHistoryPolicy::Fail
        } else {
            ShortHistoryPolicy::Empty
        },
    }
}

/// Rewrite argv so `cpi` defaults to `cpi month-to-month`.
///
/// Rules:
/// - `cpi`                       -> `cpi month-to-month`
/// - `cpi --input x.json ...`    -> `cpi month-to-month --input x.json ...`
/// - `cpi --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("month-to-month".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "month-to-month".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, SelectorArgs};
    use crate::domain::Lag;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_month_to_month() {
        assert_eq!(rewrite_args(argv(&["cpi"])), argv(&["cpi", "month-to-month"]));
        assert_eq!(
            rewrite_args(argv(&["cpi", "--format", "csv"])),
            argv(&["cpi", "month-to-month", "--format", "csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["cpi", "--help"]),
            argv(&["cpi", "-V"]),
            argv(&["cpi", "year-over-year"]),
            argv(&["cpi", "changes", "--lag", "year-over-year"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = Cli::try_parse_from(rewrite_args(argv(&["cpi", "--rounding", "half-away"]))).unwrap();
        let Command::MonthToMonth(args) = cli.command else {
            panic!("expected month-to-month");
        };
        assert_eq!(args.rounding, Rounding::HalfAway);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn strict_flag_selects_fail_policy() {
        let args = ChangesArgs {
            source: SourceArgs {
                input: None,
                lookback_years: 3,
            },
            selector: SelectorArgs {
                items: Vec::new(),
                series_ids: Vec::new(),
                not_seasonally_adjusted: false,
            },
            lag: Lag::YearOverYear,
            window: 5,
            rounding: Rounding::HalfEven,
            strict: true,
            format: OutputFormat::Json,
        };
        let config = change_config_from_args(&args);
        assert_eq!(config.short_history, ShortHistoryPolicy::Fail);
        assert_eq!(config.lag, Lag::YearOverYear);
        assert_eq!(config.window, 5);
    }
}
