// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod notify;
pub mod report;
pub mod supervise;
pub mod timer;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{RunMode, resolve_mode};
use crate::exec::Outcome;
use crate::notify::{Notify, SendmailNotifier};
use crate::report::Reporter;
use crate::supervise::Supervisor;

/// Exit code for a terminal failed or killed run (cron records it as 255).
const EXIT_FAILURE: i32 = 255;

/// High-level entry point used by `main.rs`.
///
/// Resolves the run mode once from CLI + environment, then either sends a
/// test notification or supervises the command. Returns the process exit
/// code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mode = resolve_mode(&args)?;
    let notifier = SendmailNotifier::new();

    match mode {
        RunMode::TestNotification { emails } => {
            send_test_notification(&notifier, &emails).await;
            Ok(0)
        }
        RunMode::Supervise(config) => {
            let reporter = Reporter::new(notifier);
            let supervisor = Supervisor::new(config, reporter);
            let outcome = supervisor.run().await;
            Ok(match outcome {
                Outcome::Success => 0,
                Outcome::Failure | Outcome::Killed => EXIT_FAILURE,
            })
        }
    }
}

/// `-e` without `-c`: probe the mail path so a crontab entry can be
/// verified without running anything.
async fn send_test_notification<N: Notify>(notifier: &N, emails: &[String]) {
    info!(destinations = ?emails, "sending test notification");

    let deliveries = notifier
        .send(
            emails,
            "watchjob: test notification",
            "This is a watchjob test notification. If you can read this, \
             delivery to this address works.\n",
        )
        .await;

    for delivery in &deliveries {
        match &delivery.error {
            None => info!(to = %delivery.destination, "test notification sent"),
            Some(reason) => {
                warn!(to = %delivery.destination, reason = %reason, "test notification failed");
            }
        }
    }
}
