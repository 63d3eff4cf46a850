// src/exec/runner.rs

use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a finished subprocess left this world.
///
/// A process killed by the threshold policy exits via a signal and must stay
/// distinguishable from any ordinary exit code, so the supervisor can
/// classify it as `Killed` rather than `Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisposition {
    /// Normal exit with a code. Spawn failures use the synthetic code `-1`.
    Exited(i32),
    /// Terminated by a signal (e.g. 9 after `terminate()`).
    Signaled(i32),
}

impl ExitDisposition {
    fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ExitDisposition::Signaled(sig);
            }
        }
        ExitDisposition::Exited(status.code().unwrap_or(-1))
    }
}

impl fmt::Display for ExitDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDisposition::Exited(code) => write!(f, "exited with code {code}"),
            ExitDisposition::Signaled(sig) => write!(f, "killed by signal {sig}"),
        }
    }
}

/// Classification of a terminal run record.
///
/// Never stored; always derived fresh via [`RunRecord::outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    Killed,
}

/// The captured result of one subprocess execution.
///
/// Owned and mutated only by the [`RunningCommand`] that produced it; once
/// handed out it is a plain immutable value.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub cmd: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: ExitDisposition,
    /// Wall-clock spawn-to-exit delta, whole seconds.
    pub duration: Duration,
}

impl RunRecord {
    pub fn outcome(&self) -> Outcome {
        match self.status {
            ExitDisposition::Signaled(_) => Outcome::Killed,
            ExitDisposition::Exited(0) => Outcome::Success,
            ExitDisposition::Exited(_) => Outcome::Failure,
        }
    }

    /// Synthetic record for a command the shell could not launch.
    ///
    /// Surfaces as a failure with empty output instead of crashing the
    /// supervisor.
    pub fn spawn_failure(cmd: &str) -> Self {
        let now = Utc::now();
        Self {
            cmd: cmd.to_string(),
            started_at: now,
            ended_at: now,
            stdout: Vec::new(),
            stderr: Vec::new(),
            status: ExitDisposition::Exited(-1),
            duration: Duration::ZERO,
        }
    }
}

/// A live subprocess plus its output-drain tasks.
///
/// The child's stdout/stderr are read to completion by background Tokio
/// tasks from the moment of spawn, so a chatty child can never deadlock on
/// a full pipe while we wait for it to exit.
pub struct RunningCommand {
    cmd: String,
    child: Child,
    started_at: DateTime<Utc>,
    started: Instant,
    stdout_task: JoinHandle<Vec<u8>>,
    stderr_task: JoinHandle<Vec<u8>>,
    observed_exit: Option<ExitDisposition>,
}

impl RunningCommand {
    /// Spawn `cmd_text` through the platform shell with piped output.
    pub fn spawn(cmd_text: &str) -> Result<Self> {
        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(cmd_text);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(cmd_text);
            c
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning shell for command '{cmd_text}'"))?;

        let stdout_task = drain_stream(child.stdout.take());
        let stderr_task = drain_stream(child.stderr.take());

        debug!(cmd = %cmd_text, "command spawned");

        Ok(Self {
            cmd: cmd_text.to_string(),
            child,
            started_at: Utc::now(),
            started: Instant::now(),
            stdout_task,
            stderr_task,
            observed_exit: None,
        })
    }

    /// Wall-clock time since spawn.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Non-blocking liveness check; caches the exit status once observed.
    pub fn is_running(&mut self) -> bool {
        if self.observed_exit.is_some() {
            return false;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                self.observed_exit = Some(ExitDisposition::from_status(status));
                false
            }
            Ok(None) => true,
            Err(err) => {
                warn!(error = %err, "could not poll child status; treating as exited");
                self.observed_exit = Some(ExitDisposition::Exited(-1));
                false
            }
        }
    }

    /// Send a forceful kill signal.
    ///
    /// Idempotent: repeated calls, or a call after the child already exited,
    /// are no-ops.
    pub fn terminate(&mut self) {
        if self.observed_exit.is_some() {
            return;
        }
        if let Err(err) = self.child.start_kill() {
            debug!(error = %err, "kill signal not delivered (child likely exited)");
        }
    }

    /// Wait for exit and fully drained streams, producing the final record.
    ///
    /// Duration is taken at the moment exit is observed and rounded down to
    /// whole seconds.
    pub async fn into_record(mut self) -> RunRecord {
        let status = match self.observed_exit {
            Some(status) => status,
            None => match self.child.wait().await {
                Ok(status) => ExitDisposition::from_status(status),
                Err(err) => {
                    warn!(error = %err, "waiting for child failed");
                    ExitDisposition::Exited(-1)
                }
            },
        };

        let duration = Duration::from_secs(self.started.elapsed().as_secs());
        let ended_at = Utc::now();

        let stdout = self.stdout_task.await.unwrap_or_default();
        let stderr = self.stderr_task.await.unwrap_or_default();

        RunRecord {
            cmd: self.cmd,
            started_at: self.started_at,
            ended_at,
            stdout,
            stderr,
            status,
            duration,
        }
    }
}

/// Read a child output stream to completion in a background task.
///
/// Capture is complete (no truncation here); trimming is a report-rendering
/// concern.
fn drain_stream<R>(stream: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: AsyncReadExt + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            if let Err(err) = stream.read_to_end(&mut buf).await {
                warn!(error = %err, "reading child output stream failed");
            }
        }
        buf
    })
}
