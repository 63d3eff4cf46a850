// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchjobError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WatchjobError>;
