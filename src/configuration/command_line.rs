use crate::app::event::EventFormat;
use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug, Clone, Copy)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

/// Replays test runner events and reports call results to the issue tracker.
#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// File with test runner events, one JSON object per line
    #[structopt(parse(from_os_str))]
    pub file: PathBuf,

    /// Format of the events file
    #[structopt(case_insensitive = true, long, short = "f", possible_values = &EventFormat::variants(), default_value = "Session")]
    pub format: EventFormat,

    /// Settings file with tracker credentials. Supported: YAML, JSON, TOML, HJSON
    #[structopt(long, short = "s", parse(from_os_str), env = "REPORTER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// File of KEY=VALUE lines read before the settings file, skipped when missing
    #[structopt(long, short = "e", parse(from_os_str), default_value = ".env")]
    pub env_file: PathBuf,

    /// Overrides the file the results log is appended to
    #[structopt(long, short = "r", parse(from_os_str))]
    pub results_log: Option<PathBuf>,

    /// Log tracker requests instead of sending them
    #[structopt(long)]
    pub dry_run: bool,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opt = Opt::from_iter_safe(&["ticket-reporter", "events.jsonl"]).unwrap();
        assert_eq!(opt.file, PathBuf::from("events.jsonl"));
        assert_eq!(opt.format, EventFormat::Session);
        assert!(!opt.dry_run);
        assert!(opt.results_log.is_none());
        assert_eq!(opt.env_file, PathBuf::from(".env"));
    }

    #[test]
    fn test_format_and_overrides() {
        let opt = Opt::from_iter_safe(&[
            "ticket-reporter",
            "--format",
            "libtest",
            "--results-log",
            "out/results.log",
            "--dry-run",
            "--env-file",
            "ci/tracker.env",
            "-L",
            "debug",
            "events.jsonl",
        ])
        .unwrap();
        assert_eq!(opt.format, EventFormat::Libtest);
        assert_eq!(opt.results_log, Some(PathBuf::from("out/results.log")));
        assert!(opt.dry_run);
        assert_eq!(opt.env_file, PathBuf::from("ci/tracker.env"));
        assert_eq!(LevelFilter::from(opt.logging.unwrap()), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Opt::from_iter_safe(&["ticket-reporter", "-f", "junit", "events.jsonl"]).is_err());
    }
}
