// src/report/mod.rs

//! Outcome reporting: payload construction, rendering rules, dispatch.

pub mod payload;
pub mod reporter;

pub use payload::{ReportPayload, display_hours, trim_tail};
pub use reporter::{Dispatched, Reporter};
