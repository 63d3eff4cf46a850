// src/exec/mod.rs

//! Subprocess execution: spawning, polling, termination, output capture.

pub mod runner;

pub use runner::{ExitDisposition, Outcome, RunRecord, RunningCommand};
