// src/timer.rs

//! Duration thresholds: parsing and elapsed-time comparison.
//!
//! A threshold is written as `<N><unit>` with unit `s`, `m` or `h`
//! (e.g. `"45s"`, `"30m"`, `"2h"`) and is normalized to whole seconds when
//! parsed. Parsing happens once at configuration time; the value is
//! immutable afterwards.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::WatchjobError;

/// A wall-clock threshold, normalized to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    secs: u64,
}

impl Threshold {
    pub fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.secs)
    }

    /// Strict comparison: `elapsed == threshold` does not trigger.
    pub fn exceeded_by(&self, elapsed: Duration) -> bool {
        elapsed > self.as_duration()
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.secs)
    }
}

impl FromStr for Threshold {
    type Err = WatchjobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid(s, "empty duration string"));
        }

        // Find the boundary between digits and suffix.
        let idx = s
            .chars()
            .position(|c| !c.is_ascii_digit())
            .ok_or_else(|| invalid(s, "missing unit suffix (expected s, m, or h)"))?;

        let (num_part, unit_part) = s.split_at(idx);
        let value: u64 = num_part
            .parse()
            .map_err(|e| invalid(s, &format!("invalid number '{num_part}': {e}")))?;
        let unit = unit_part.trim().to_lowercase();

        let secs = match unit.as_str() {
            "s" => value,
            "m" => value * 60,
            "h" => value * 60 * 60,
            _ => {
                return Err(invalid(
                    s,
                    &format!("unsupported unit '{unit}'; expected s, m, or h"),
                ));
            }
        };

        Ok(Threshold { secs })
    }
}

fn invalid(input: &str, reason: &str) -> WatchjobError {
    WatchjobError::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
