// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The flags here are only parsed; all interpretation (duration parsing,
//! `MAILTO` defaulting, mode selection) happens in `config::model`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchjob`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchjob",
    version,
    about = "Supervise a cron command: time thresholds, kill policy, mail reports.",
    long_about = None
)]
pub struct CliArgs {
    /// Command to run (passed to the shell, pipelines/redirection work).
    #[arg(short = 'c', long, value_name = "CMD")]
    pub cmd: Option<String>,

    /// Comma-separated notification addresses.
    ///
    /// Defaults to the `MAILTO` environment variable when omitted. With
    /// `--emails` but no `--cmd`, a test notification is sent instead of
    /// supervising anything.
    #[arg(short = 'e', long, value_name = "ADDR,ADDR,...")]
    pub emails: Option<String>,

    /// Soft-timeout threshold, e.g. `30s`, `10m`, `2h`.
    ///
    /// Crossing it sends one threshold-exceeded notification per attempt.
    #[arg(short = 't', long, value_name = "N<h|m|s>")]
    pub time: Option<String>,

    /// Kill the process when the soft threshold is exceeded.
    #[arg(short = 'k', long)]
    pub kill: bool,

    /// Independent hard-kill threshold; always kills on crossing.
    #[arg(long, visible_alias = "kt", value_name = "N<h|m|s>")]
    pub killtime: Option<String>,

    /// Retry on failure or kill, indefinitely.
    #[arg(short = 'r', long)]
    pub retry: bool,

    /// Also report successful runs, and print progress while polling.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHJOB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
