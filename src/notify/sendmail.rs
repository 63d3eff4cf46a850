// src/notify/sendmail.rs

use std::process::Stdio;

use anyhow::{Context, Result, anyhow};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::notify::{Delivery, Notify};

const DEFAULT_SENDMAIL: &str = "sendmail";

/// Mail transport that pipes a message to a local `sendmail` binary, one
/// invocation per destination.
///
/// The transport itself is deliberately opaque: watchjob composes the
/// message and hands it over; routing, relaying and queueing are the MTA's
/// problem.
#[derive(Debug, Clone)]
pub struct SendmailNotifier {
    program: String,
}

impl SendmailNotifier {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_SENDMAIL.to_string(),
        }
    }

    /// Use a different sendmail-compatible binary.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    async fn deliver(&self, destination: &str, subject: &str, body: &str) -> Result<()> {
        let message = format!("To: {destination}\nSubject: {subject}\n\n{body}\n");

        let mut child = Command::new(&self.program)
            .arg("-i")
            .arg(destination)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("spawning {} for '{destination}'", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("no stdin pipe on {} child", self.program))?;
        stdin
            .write_all(message.as_bytes())
            .await
            .context("writing message to sendmail stdin")?;
        drop(stdin);

        let status = child.wait().await.context("waiting for sendmail")?;
        if !status.success() {
            return Err(anyhow!(
                "{} exited with status {}",
                self.program,
                status.code().unwrap_or(-1)
            ));
        }
        Ok(())
    }
}

impl Default for SendmailNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for SendmailNotifier {
    async fn send(&self, destinations: &[String], subject: &str, body: &str) -> Vec<Delivery> {
        let mut results = Vec::with_capacity(destinations.len());

        for destination in destinations {
            match self.deliver(destination, subject, body).await {
                Ok(()) => {
                    debug!(to = %destination, subject = %subject, "notification delivered");
                    results.push(Delivery::ok(destination));
                }
                Err(err) => {
                    warn!(to = %destination, error = %err, "notification delivery failed");
                    results.push(Delivery::failed(destination, err.to_string()));
                }
            }
        }

        results
    }
}
