//! Histogram of solve times.

use serde::{Deserialize, Serialize};

/// One histogram bar covering `[min_ms, max_ms)`; the last bar also holds
/// the maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub min_ms: f64,
    pub max_ms: f64,
    pub count: usize,
}

/// Split finished times into `bucket_count` equal-width buckets.
///
/// Empty input (or zero buckets) gives no buckets; if every time is equal a
/// single bucket holds them all.
pub fn time_buckets(times_ms: &[f64], bucket_count: usize) -> Vec<TimeBucket> {
    let finite: Vec<f64> = times_ms.iter().copied().filter(|t| t.is_finite()).collect();
    if finite.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![TimeBucket {
            min_ms: min,
            max_ms: max,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bucket_count as f64;
    let mut buckets: Vec<TimeBucket> = (0..bucket_count)
        .map(|i| TimeBucket {
            min_ms: min + i as f64 * width,
            max_ms: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for t in finite {
        let index = (((t - min) / width).floor() as usize).min(bucket_count - 1);
        buckets[index].count += 1;
    }
    buckets
}
