// src/report/reporter.rs

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::SupervisionConfig;
use crate::exec::{Outcome, RunRecord};
use crate::notify::{Delivery, Notify};
use crate::report::payload::ReportPayload;

/// What became of one report.
#[derive(Debug)]
pub enum Dispatched {
    /// Success report with verbose off; nothing was rendered or sent.
    Suppressed,
    /// Printed to stdout (no destinations configured); carries the body.
    Local(String),
    /// Handed to the notifier, one result per destination.
    Notified(Vec<Delivery>),
}

/// Maps terminal and threshold states to report payloads and dispatches
/// them through a notifier, falling back to local output when no
/// destinations are configured.
pub struct Reporter<N> {
    notifier: N,
}

impl<N: Notify> Reporter<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    /// Report a terminal outcome.
    ///
    /// Success reports are dispatched only in verbose mode; failures and
    /// kills always go out.
    pub async fn report_outcome(
        &self,
        outcome: Outcome,
        config: &SupervisionConfig,
        record: &RunRecord,
    ) -> Dispatched {
        if outcome == Outcome::Success && !config.verbose {
            debug!("success report suppressed (verbose off)");
            return Dispatched::Suppressed;
        }

        let payload = ReportPayload::for_outcome(outcome, config, record);
        self.dispatch(&payload, config).await
    }

    /// Report a crossed soft timeout for a still-running command.
    pub async fn report_threshold(
        &self,
        config: &SupervisionConfig,
        started_at: DateTime<Utc>,
        elapsed_secs: u64,
    ) -> Dispatched {
        let payload = ReportPayload::for_threshold(config, started_at, elapsed_secs);
        self.dispatch(&payload, config).await
    }

    async fn dispatch(&self, payload: &ReportPayload, config: &SupervisionConfig) -> Dispatched {
        let body = payload.render();

        if config.emails.is_empty() {
            // Local output: the report goes to stdout so cron captures it.
            println!("{body}");
            return Dispatched::Local(body);
        }

        let deliveries = self
            .notifier
            .send(&config.emails, &payload.title, &body)
            .await;

        for delivery in &deliveries {
            match &delivery.error {
                None => info!(to = %delivery.destination, "report sent"),
                Some(reason) => {
                    warn!(to = %delivery.destination, reason = %reason, "report delivery failed");
                }
            }
        }

        Dispatched::Notified(deliveries)
    }
}
