// src/supervise/mod.rs

//! The supervision state machine: poll loop, threshold policy, retry.

pub mod supervisor;

pub use supervisor::{POLL_INTERVAL, Supervisor};
