// src/config/model.rs

use tracing::warn;

use crate::cli::CliArgs;
use crate::errors::{Result, WatchjobError};
use crate::timer::Threshold;

/// Environment variable supplying default notification addresses, the same
/// one cron itself uses for job output.
pub const MAILTO_ENV: &str = "MAILTO";

/// What the process should do, decided once from the CLI surface.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Supervise a command.
    Supervise(SupervisionConfig),
    /// No command given, but addresses are: send a probe message so the
    /// mail path can be verified from a crontab without running anything.
    TestNotification { emails: Vec<String> },
}

/// Everything one supervision attempt needs, resolved at startup.
///
/// Immutable for the lifetime of an attempt; a retry reuses the same value.
#[derive(Debug, Clone)]
pub struct SupervisionConfig {
    /// Command text, passed to the shell unmodified.
    pub cmd: String,
    /// Soft timeout: crossing it sends one notification per attempt.
    pub soft_timeout: Option<Threshold>,
    /// Kill the process when the soft timeout is exceeded.
    pub kill_on_timeout: bool,
    /// Independent hard-kill threshold; always kills on crossing.
    pub kill_after: Option<Threshold>,
    /// Restart on failure or kill, indefinitely.
    pub retry: bool,
    /// Also dispatch reports for successful runs.
    pub verbose: bool,
    /// Notification destinations; empty means local output only.
    pub emails: Vec<String>,
}

/// Resolve the run mode from parsed CLI arguments.
///
/// This is the only place `MAILTO` is read.
pub fn resolve_mode(args: &CliArgs) -> Result<RunMode> {
    let emails = resolve_emails(args.emails.as_deref());

    let Some(cmd) = args.cmd.clone() else {
        if emails.is_empty() {
            return Err(WatchjobError::ConfigError(
                "no command given (-c/--cmd) and no addresses to test (-e/--emails or MAILTO)"
                    .to_string(),
            ));
        }
        return Ok(RunMode::TestNotification { emails });
    };

    if cmd.trim().is_empty() {
        return Err(WatchjobError::ConfigError(
            "command text is empty".to_string(),
        ));
    }

    let soft_timeout = args.time.as_deref().map(str::parse).transpose()?;
    let kill_after = args.killtime.as_deref().map(str::parse).transpose()?;

    if args.kill && soft_timeout.is_none() {
        warn!("--kill has no effect without a --time threshold");
    }

    Ok(RunMode::Supervise(SupervisionConfig {
        cmd,
        soft_timeout,
        kill_on_timeout: args.kill,
        kill_after,
        retry: args.retry,
        verbose: args.verbose,
        emails,
    }))
}

/// Explicit `-e` list wins; otherwise fall back to `MAILTO`.
/// Both are comma-separated; blank entries are dropped.
fn resolve_emails(cli_emails: Option<&str>) -> Vec<String> {
    let raw = match cli_emails {
        Some(s) => s.to_string(),
        None => std::env::var(MAILTO_ENV).unwrap_or_default(),
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
