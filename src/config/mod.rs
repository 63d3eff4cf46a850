// src/config/mod.rs

//! Configuration resolution for watchjob.
//!
//! Responsibilities:
//! - Define the immutable supervision configuration (`model.rs`).
//! - Resolve it exactly once at startup from CLI args plus the `MAILTO`
//!   environment variable; nothing reads the environment mid-run.

pub mod model;

pub use model::{RunMode, SupervisionConfig, resolve_mode};
