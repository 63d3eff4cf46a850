// src/notify/mod.rs

//! Destination-fanout delivery of report messages.
//!
//! Delivery is attempted independently per destination: one unreachable
//! address never blocks the others, and `send` itself never errors — each
//! attempt's result comes back in a [`Delivery`] for logging.

pub mod sendmail;

pub use sendmail::SendmailNotifier;

/// Result of one delivery attempt.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub destination: String,
    /// `None` on success, otherwise a human-readable reason.
    pub error: Option<String>,
}

impl Delivery {
    pub fn ok(destination: &str) -> Self {
        Self {
            destination: destination.to_string(),
            error: None,
        }
    }

    pub fn failed(destination: &str, reason: String) -> Self {
        Self {
            destination: destination.to_string(),
            error: Some(reason),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// A message transport.
///
/// Implementations deliver `body` under `subject` to every destination and
/// report per-destination results; partial failure is a normal outcome.
pub trait Notify {
    fn send(
        &self,
        destinations: &[String],
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Vec<Delivery>> + Send;
}
