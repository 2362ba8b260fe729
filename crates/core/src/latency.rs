// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Latency meter.
//!
//! Expects lines in the wire format `<decimal-seconds>|<payload>`,
//! where the timestamp is fractional seconds since the Unix epoch as
//! stamped by the upstream injector. Each valid line yields one latency
//! sample, `now - send_timestamp`, taken the moment the line is parsed.
//! Unparseable lines are counted and skipped; they never abort the run.

use crate::clock::Clock;
use crate::result::{EmptyResult, LatencyOutcome, LatencyResult, LatencyStats};
use tracing::warn;

/// Separator between the timestamp field and the payload.
pub const TIMESTAMP_SEPARATOR: char = '|';

/// Stopping condition for a latency run.
#[derive(Debug, Clone, Default)]
pub struct LatencyOptions {
    /// Stop after this many lines have been read, valid or not.
    pub max_lines: Option<u64>,
}

/// Split a wire line into its send timestamp and payload.
///
/// The line splits on the first separator only, so payloads may
/// themselves contain the separator. Returns `None` when the separator
/// is missing or the timestamp field is not a real number; the caller
/// skips such lines.
pub fn parse_timed_line(line: &str) -> Option<(f64, &str)> {
    let (timestamp, payload) = line.split_once(TIMESTAMP_SEPARATOR)?;
    let timestamp: f64 = timestamp.trim().parse().ok()?;
    Some((timestamp, payload))
}

/// Measure per-line latency over a stream of timestamped lines.
///
/// Returns [`LatencyOutcome::Empty`] when not a single line parsed;
/// callers must treat that as a distinct failure, not as zero latency.
pub fn measure<I, C>(lines: I, options: &LatencyOptions, clock: &C) -> LatencyOutcome
where
    I: IntoIterator<Item = String>,
    C: Clock,
{
    let mut latencies: Vec<f64> = Vec::new();
    let mut line_count: u64 = 0;
    let mut error_count: u64 = 0;

    for line in lines {
        line_count += 1;
        match parse_timed_line(&line) {
            Some((send_timestamp, _payload)) => {
                latencies.push(clock.now() - send_timestamp);
            }
            None => {
                error_count += 1;
                warn!(line = line_count, "failed to parse latency line, skipping");
            }
        }

        if options.max_lines.is_some_and(|max| line_count >= max) {
            break;
        }
    }

    if latencies.is_empty() {
        return LatencyOutcome::Empty(EmptyResult::new(line_count, error_count));
    }

    latencies.sort_by(f64::total_cmp);
    let seconds = LatencyStats::from_sorted(&latencies);
    LatencyOutcome::Stats(LatencyResult {
        line_count,
        valid_measurements: latencies.len() as u64,
        error_count,
        latency_milliseconds: seconds.scaled(1000.0),
        latency_seconds: seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock pinned to one instant.
    struct FixedClock(f64);

    impl Clock for FixedClock {
        fn now(&self) -> f64 {
            self.0
        }
    }

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_timed_line() {
        assert_eq!(
            parse_timed_line("1000.500000|payload"),
            Some((1000.5, "payload"))
        );
    }

    #[test]
    fn test_parse_splits_on_first_separator_only() {
        assert_eq!(parse_timed_line("1.0|a|b"), Some((1.0, "a|b")));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(parse_timed_line("no separator here"), None);
    }

    #[test]
    fn test_parse_rejects_non_numeric_timestamp() {
        assert_eq!(parse_timed_line("yesterday|data"), None);
    }

    #[test]
    fn test_parse_accepts_low_precision_timestamps() {
        // The injector emits six fractional digits but the meter must
        // not require that precision.
        assert_eq!(parse_timed_line("1000|x"), Some((1000.0, "x")));
        assert_eq!(parse_timed_line("1000.5|x"), Some((1000.5, "x")));
    }

    #[test]
    fn test_latencies_measured_against_fixed_receive_time() {
        let clock = FixedClock(2000.0);
        let lines = owned(&["1000.000000|a", "1000.500000|b", "1001.000000|c"]);
        let outcome = measure(lines, &LatencyOptions::default(), &clock);

        let LatencyOutcome::Stats(result) = outcome else {
            panic!("expected statistics");
        };
        assert_eq!(result.valid_measurements, 3);
        assert_eq!(result.latency_seconds.min, 999.0);
        assert_eq!(result.latency_seconds.max, 1000.0);
        assert_eq!(result.latency_seconds.median, 999.5);
        assert_eq!(result.latency_milliseconds.median, 999_500.0);
    }

    #[test]
    fn test_unparseable_lines_are_counted_not_fatal() {
        let clock = FixedClock(10.0);
        let lines = owned(&["garbage", "5.0|ok", "also garbage"]);
        let outcome = measure(lines, &LatencyOptions::default(), &clock);

        let LatencyOutcome::Stats(result) = outcome else {
            panic!("expected statistics");
        };
        assert_eq!(result.line_count, 3);
        assert_eq!(result.valid_measurements, 1);
        assert_eq!(result.error_count, 2);
        assert_eq!(result.latency_seconds.min, 5.0);
    }

    #[test]
    fn test_zero_valid_lines_is_the_empty_outcome() {
        let clock = FixedClock(10.0);
        let lines = owned(&["nope", "still nope"]);
        let outcome = measure(lines, &LatencyOptions::default(), &clock);

        let LatencyOutcome::Empty(empty) = outcome else {
            panic!("expected the empty outcome, not zero-filled statistics");
        };
        assert_eq!(empty.line_count, 2);
        assert_eq!(empty.error_count, 2);
    }

    #[test]
    fn test_empty_stream_is_the_empty_outcome() {
        let clock = FixedClock(10.0);
        let outcome = measure(Vec::new(), &LatencyOptions::default(), &clock);
        assert!(matches!(outcome, LatencyOutcome::Empty(_)));
    }

    #[test]
    fn test_max_lines_counts_errored_lines_too() {
        let clock = FixedClock(10.0);
        let lines = owned(&["bad", "1.0|a", "2.0|b", "3.0|c"]);
        let options = LatencyOptions {
            max_lines: Some(2),
        };
        let outcome = measure(lines, &options, &clock);

        let LatencyOutcome::Stats(result) = outcome else {
            panic!("expected statistics");
        };
        assert_eq!(result.line_count, 2);
        assert_eq!(result.valid_measurements, 1);
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_milliseconds_group_is_scaled_copy() {
        let clock = FixedClock(1.5);
        let lines = owned(&["1.0|a", "0.5|b"]);
        let outcome = measure(lines, &LatencyOptions::default(), &clock);

        let LatencyOutcome::Stats(result) = outcome else {
            panic!("expected statistics");
        };
        assert_eq!(result.latency_seconds.max, 1.0);
        assert_eq!(result.latency_milliseconds.max, 1000.0);
        assert_eq!(result.latency_seconds.min, 0.5);
        assert_eq!(result.latency_milliseconds.min, 500.0);
    }
}
