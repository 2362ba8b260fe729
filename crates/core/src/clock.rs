// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock abstraction for the meters.
//!
//! The meters take the clock as an explicit parameter instead of
//! reading ambient time, which keeps rate and latency computations
//! deterministic under test.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of wall-clock time.
pub trait Clock {
    /// Current time as fractional seconds since the Unix epoch.
    fn now(&self) -> f64;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_past_epoch() {
        let clock = SystemClock;
        assert!(clock.now() > 0.0);
    }

    #[test]
    fn test_system_clock_does_not_go_backwards() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
