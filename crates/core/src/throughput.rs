// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Throughput meter.
//!
//! Counts lines and bytes over wall-clock time, with optional stopping
//! conditions and a periodic progress report. The meter makes one pass
//! over the input and reports on whatever it saw; a stream that ends
//! early (or is cut off) simply yields a shorter run.

use crate::clock::Clock;
use crate::result::ThroughputResult;

/// Default progress cadence in seconds.
pub const DEFAULT_REPORT_INTERVAL: f64 = 1.0;

/// Stopping conditions and progress cadence for a throughput run.
#[derive(Debug, Clone)]
pub struct ThroughputOptions {
    /// Stop after this many wall-clock seconds.
    pub duration: Option<f64>,
    /// Stop after this many lines.
    pub max_lines: Option<u64>,
    /// Seconds between progress reports. Use `f64::INFINITY` to
    /// silence progress entirely.
    pub report_interval: f64,
}

impl Default for ThroughputOptions {
    fn default() -> Self {
        Self {
            duration: None,
            max_lines: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

/// Interim snapshot emitted on the progress cadence.
///
/// Progress is diagnostic only; it is never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Lines read so far.
    pub line_count: u64,
    /// Interim rate, counts-so-far over elapsed-so-far.
    pub lines_per_second: f64,
    /// Interim rate in megabytes per second.
    pub megabytes_per_second: f64,
}

/// Measure throughput over a stream of lines.
///
/// After each line the stopping predicates are evaluated in order:
/// `max_lines` first, then elapsed `duration`. Independently, whenever
/// the wall clock has advanced `report_interval` seconds past the last
/// emission, `on_progress` is invoked with an interim snapshot.
///
/// `duration_seconds` of the result is measured from the first read
/// attempt to loop termination.
pub fn measure<I, C, F>(
    lines: I,
    options: &ThroughputOptions,
    clock: &C,
    mut on_progress: F,
) -> ThroughputResult
where
    I: IntoIterator<Item = String>,
    C: Clock,
    F: FnMut(Progress),
{
    let start = clock.now();
    let mut last_report = start;
    let mut line_count: u64 = 0;
    let mut byte_count: u64 = 0;

    for line in lines {
        line_count += 1;
        byte_count += line.len() as u64;

        if options.max_lines.is_some_and(|max| line_count >= max) {
            break;
        }

        let now = clock.now();
        let elapsed = now - start;

        if options.duration.is_some_and(|limit| elapsed >= limit) {
            break;
        }

        if now - last_report >= options.report_interval {
            on_progress(interim(line_count, byte_count, elapsed));
            last_report = now;
        }
    }

    ThroughputResult::from_counts(line_count, byte_count, clock.now() - start)
}

fn interim(line_count: u64, byte_count: u64, elapsed: f64) -> Progress {
    let (lines_per_second, bytes_per_second) = if elapsed > 0.0 {
        (
            line_count as f64 / elapsed,
            byte_count as f64 / elapsed,
        )
    } else {
        (0.0, 0.0)
    };
    Progress {
        line_count,
        lines_per_second,
        megabytes_per_second: bytes_per_second / 1024.0 / 1024.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Clock advancing a fixed step on every `now` call.
    struct StepClock {
        next: Cell<f64>,
        step: f64,
    }

    impl StepClock {
        fn new(start: f64, step: f64) -> Self {
            Self {
                next: Cell::new(start),
                step,
            }
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> f64 {
            let now = self.next.get();
            self.next.set(now + self.step);
            now
        }
    }

    fn lines_of(count: usize, len: usize) -> Vec<String> {
        (0..count).map(|_| "x".repeat(len)).collect()
    }

    #[test]
    fn test_counts_every_line_without_stopping_conditions() {
        for n in [0usize, 1, 7, 100] {
            let clock = StepClock::new(0.0, 0.0);
            let result = measure(
                lines_of(n, 10),
                &ThroughputOptions::default(),
                &clock,
                |_| {},
            );
            assert_eq!(result.line_count, n as u64);
        }
    }

    #[test]
    fn test_avg_line_length_excludes_newline() {
        let clock = StepClock::new(0.0, 0.01);
        let result = measure(
            lines_of(100, 200),
            &ThroughputOptions::default(),
            &clock,
            |_| {},
        );
        assert_eq!(result.line_count, 100);
        assert_eq!(result.avg_line_length, 200.0);
    }

    #[test]
    fn test_max_lines_stops_the_loop() {
        let clock = StepClock::new(0.0, 0.0);
        let options = ThroughputOptions {
            max_lines: Some(3),
            ..Default::default()
        };
        let result = measure(lines_of(100, 5), &options, &clock, |_| {});
        assert_eq!(result.line_count, 3);
    }

    #[test]
    fn test_duration_stops_the_loop() {
        // One second passes per clock sample; the per-line check sees
        // elapsed 1.0, 2.0, 3.0, ... and trips at 2.5.
        let clock = StepClock::new(0.0, 1.0);
        let options = ThroughputOptions {
            duration: Some(2.5),
            report_interval: f64::INFINITY,
            ..Default::default()
        };
        let result = measure(lines_of(100, 5), &options, &clock, |_| {});
        assert_eq!(result.line_count, 3);
    }

    #[test]
    fn test_max_lines_takes_precedence_over_duration() {
        let clock = StepClock::new(0.0, 10.0);
        let options = ThroughputOptions {
            duration: Some(5.0),
            max_lines: Some(1),
            report_interval: f64::INFINITY,
        };
        let result = measure(lines_of(10, 5), &options, &clock, |_| {});
        assert_eq!(result.line_count, 1);
    }

    #[test]
    fn test_final_rates_derive_from_measured_duration() {
        // start=0, five per-line samples, final sample at 6.0.
        let clock = StepClock::new(0.0, 1.0);
        let options = ThroughputOptions {
            report_interval: f64::INFINITY,
            ..Default::default()
        };
        let result = measure(lines_of(5, 100), &options, &clock, |_| {});
        assert_eq!(result.duration_seconds, 6.0);
        assert!((result.lines_per_second - 5.0 / 6.0).abs() < 1e-12);
        assert!((result.bytes_per_second - 500.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_emitted_on_cadence() {
        let clock = StepClock::new(0.0, 1.0);
        let options = ThroughputOptions {
            report_interval: 2.0,
            ..Default::default()
        };
        let mut reports = Vec::new();
        measure(lines_of(6, 10), &options, &clock, |p| reports.push(p));
        // Per-line samples land at 1,2,3,4,5,6; emissions at 2, 4, 6.
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].line_count, 2);
        assert!((reports[0].lines_per_second - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_progress_rates_guarded_at_zero_elapsed() {
        let clock = StepClock::new(0.0, 0.0);
        let options = ThroughputOptions {
            report_interval: 0.0,
            ..Default::default()
        };
        let mut reports = Vec::new();
        measure(lines_of(2, 10), &options, &clock, |p| reports.push(p));
        assert!(!reports.is_empty());
        assert_eq!(reports[0].lines_per_second, 0.0);
        assert_eq!(reports[0].megabytes_per_second, 0.0);
    }

    #[test]
    fn test_empty_stream_yields_zeroed_document() {
        let clock = StepClock::new(0.0, 0.0);
        let result = measure(
            Vec::<String>::new(),
            &ThroughputOptions::default(),
            &clock,
            |_| {},
        );
        assert_eq!(result.line_count, 0);
        assert_eq!(result.byte_count, 0);
        assert_eq!(result.lines_per_second, 0.0);
        assert_eq!(result.avg_line_length, 0.0);
    }
}
