// src/supervise/supervisor.rs

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::SupervisionConfig;
use crate::exec::{Outcome, RunRecord, RunningCommand};
use crate::notify::Notify;
use crate::report::Reporter;

/// Cadence of the watch loop. Cron-scale jobs gain nothing from sub-second
/// precision, so one coarse tick bounds the loop's CPU cost.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Supervises one command: spawn, poll against thresholds, terminate when
/// policy says so, classify the exit, report, and retry if configured.
///
/// The poll loop is the only consumer of the running command's state and
/// the only writer of the per-attempt soft-timeout flag. Retries are
/// sequential; each attempt owns its subprocess exclusively.
pub struct Supervisor<N> {
    config: SupervisionConfig,
    reporter: Reporter<N>,
}

impl<N: Notify> Supervisor<N> {
    pub fn new(config: SupervisionConfig, reporter: Reporter<N>) -> Self {
        Self { config, reporter }
    }

    /// Run attempts until a terminal outcome.
    ///
    /// Success is always terminal. Failure and Killed are terminal unless
    /// the retry flag is set, in which case the attempt restarts from
    /// scratch with the same configuration — unbounded, so the caller
    /// relies on kill thresholds or the job scheduler to cap total cost.
    pub async fn run(&self) -> Outcome {
        let mut attempt: u64 = 1;

        loop {
            info!(cmd = %self.config.cmd, attempt, "starting supervised command");
            let record = self.run_attempt().await;
            let outcome = record.outcome();

            match outcome {
                Outcome::Success => {
                    info!(duration_secs = record.duration.as_secs(), "command succeeded");
                    self.reporter
                        .report_outcome(outcome, &self.config, &record)
                        .await;
                    return outcome;
                }
                Outcome::Failure | Outcome::Killed => {
                    if self.config.retry {
                        warn!(
                            status = %record.status,
                            attempt,
                            "command did not succeed; retrying"
                        );
                        attempt += 1;
                        continue;
                    }
                    warn!(status = %record.status, "command did not succeed");
                    self.reporter
                        .report_outcome(outcome, &self.config, &record)
                        .await;
                    return outcome;
                }
            }
        }
    }

    /// One attempt: spawn, poll until exit, collect the record.
    async fn run_attempt(&self) -> RunRecord {
        let mut run = match RunningCommand::spawn(&self.config.cmd) {
            Ok(run) => run,
            Err(err) => {
                warn!(cmd = %self.config.cmd, error = %err, "spawn failed");
                // Failed spawns are instant; pace them like a normal poll
                // tick so a retry loop cannot spin hot.
                sleep(POLL_INTERVAL).await;
                return RunRecord::spawn_failure(&self.config.cmd);
            }
        };

        // Fires at most once per attempt.
        let mut soft_notified = false;

        loop {
            sleep(POLL_INTERVAL).await;

            if !run.is_running() {
                break;
            }

            let elapsed = run.elapsed();
            debug!(elapsed_secs = elapsed.as_secs(), "command still running");

            // Soft timeout: notify once, then optionally escalate to a kill.
            if let Some(threshold) = self.config.soft_timeout {
                if !soft_notified && threshold.exceeded_by(elapsed) {
                    soft_notified = true;
                    info!(threshold = %threshold, "soft timeout exceeded");
                    self.reporter
                        .report_threshold(&self.config, run.started_at(), elapsed.as_secs())
                        .await;
                    if self.config.kill_on_timeout {
                        info!("kill-on-timeout set; terminating command");
                        run.terminate();
                    }
                }
            }

            // Hard kill: unconditional, re-checked every tick until the
            // process actually exits. terminate() is idempotent.
            if let Some(threshold) = self.config.kill_after {
                if threshold.exceeded_by(elapsed) {
                    info!(threshold = %threshold, "hard-kill threshold exceeded; terminating");
                    run.terminate();
                }
            }
        }

        run.into_record().await
    }
}
