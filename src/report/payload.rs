// src/report/payload.rs

use chrono::{DateTime, Utc};

use crate::config::SupervisionConfig;
use crate::exec::{Outcome, RunRecord};

/// How many trailing bytes of each captured stream make it into a report.
pub const STREAM_TAIL_BYTES: usize = 10_000;

/// Marker prepended to a stream that had to be trimmed.
pub const TRUNCATION_MARKER: &str = "[... truncated, showing trailing 10000 bytes ...]\n";

/// Runs shorter than this display as 0.0 hours instead of fractional noise.
const HOURS_DISPLAY_FLOOR_SECS: u64 = 60;

/// A structured report, built on demand from a run record and the
/// supervision config. Transient: rendered, dispatched, dropped.
#[derive(Debug, Clone)]
pub struct ReportPayload {
    pub title: String,
    pub cmd: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_secs: u64,
    pub soft_timeout: Option<String>,
    pub kill_after: Option<String>,
    pub exit_status: Option<String>,
    pub stdout_tail: String,
    pub stderr_tail: String,
}

impl ReportPayload {
    /// Payload for a terminal outcome.
    pub fn for_outcome(outcome: Outcome, config: &SupervisionConfig, record: &RunRecord) -> Self {
        let title = match outcome {
            Outcome::Success => "watchjob: command succeeded",
            Outcome::Failure => "watchjob: command failed",
            Outcome::Killed => "watchjob: command killed",
        };

        Self {
            title: title.to_string(),
            cmd: record.cmd.clone(),
            started_at: record.started_at,
            ended_at: Some(record.ended_at),
            duration_secs: record.duration.as_secs(),
            soft_timeout: config.soft_timeout.map(|t| t.to_string()),
            kill_after: config.kill_after.map(|t| t.to_string()),
            exit_status: Some(record.status.to_string()),
            stdout_tail: trim_tail(&record.stdout),
            stderr_tail: trim_tail(&record.stderr),
        }
    }

    /// Payload for a soft-timeout notification; the command is still
    /// running, so there is no end timestamp, exit status or output yet.
    pub fn for_threshold(
        config: &SupervisionConfig,
        started_at: DateTime<Utc>,
        elapsed_secs: u64,
    ) -> Self {
        Self {
            title: "watchjob: time threshold exceeded".to_string(),
            cmd: config.cmd.clone(),
            started_at,
            ended_at: None,
            duration_secs: elapsed_secs,
            soft_timeout: config.soft_timeout.map(|t| t.to_string()),
            kill_after: config.kill_after.map(|t| t.to_string()),
            exit_status: None,
            stdout_tail: String::new(),
            stderr_tail: String::new(),
        }
    }

    /// Render the message body.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&format!("command: {}\n", self.cmd));
        out.push_str(&format!(
            "started: {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        match self.ended_at {
            Some(ended) => {
                out.push_str(&format!("ended:   {}\n", ended.format("%Y-%m-%d %H:%M:%S UTC")));
            }
            None => out.push_str("ended:   still running\n"),
        }
        out.push_str(&format!(
            "duration: {} s ({:.2} h)\n",
            self.duration_secs,
            display_hours(self.duration_secs)
        ));
        out.push_str(&format!(
            "soft timeout: {}\n",
            self.soft_timeout.as_deref().unwrap_or("none")
        ));
        out.push_str(&format!(
            "hard kill:    {}\n",
            self.kill_after.as_deref().unwrap_or("none")
        ));
        if let Some(ref status) = self.exit_status {
            out.push_str(&format!("exit status: {status}\n"));
        }

        if !self.stdout_tail.is_empty() {
            out.push_str("\n--- stdout ---\n");
            out.push_str(&self.stdout_tail);
            if !self.stdout_tail.ends_with('\n') {
                out.push('\n');
            }
        }
        if !self.stderr_tail.is_empty() {
            out.push_str("\n--- stderr ---\n");
            out.push_str(&self.stderr_tail);
            if !self.stderr_tail.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }
}

/// Duration in hours for display.
///
/// Runs under 60 seconds display as 0.0 hours; everything else is the plain
/// `seconds / 3600` fraction.
pub fn display_hours(secs: u64) -> f64 {
    if secs < HOURS_DISPLAY_FLOOR_SECS {
        0.0
    } else {
        secs as f64 / 3600.0
    }
}

/// Trailing slice of a captured stream, as text.
///
/// Streams over [`STREAM_TAIL_BYTES`] keep only their most recent bytes,
/// prefixed with [`TRUNCATION_MARKER`]; shorter streams pass through
/// unmodified.
pub fn trim_tail(bytes: &[u8]) -> String {
    if bytes.len() <= STREAM_TAIL_BYTES {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let tail = &bytes[bytes.len() - STREAM_TAIL_BYTES..];
    format!("{}{}", TRUNCATION_MARKER, String::from_utf8_lossy(tail))
}
