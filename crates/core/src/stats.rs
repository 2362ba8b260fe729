// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pure statistics helpers.
//!
//! These functions take their samples as plain slices and read no
//! ambient state. Percentiles use the nearest-rank method: a direct
//! index into the sorted sample, without interpolation.

/// Arithmetic mean. Returns 0 for an empty sample.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Median of an ascending-sorted sample.
///
/// The middle element for odd lengths, the average of the two middle
/// elements for even lengths. Returns 0 for an empty sample.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Nearest-rank percentile of an ascending-sorted sample.
///
/// `quantile` is a fraction in `[0, 1]`; the result is
/// `sorted[floor(quantile * n)]` with the index clamped to the last
/// element. Returns 0 for an empty sample.
pub fn percentile_sorted(sorted: &[f64], quantile: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let index = ((quantile * n as f64) as usize).min(n - 1);
    sorted[index]
}

/// Sample standard deviation. Defined as 0 when fewer than two samples.
pub fn sample_stddev(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let mean = mean(samples);
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
