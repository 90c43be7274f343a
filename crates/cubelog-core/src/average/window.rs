use serde::{Deserialize, Serialize};

use crate::time::NormalizedTime;

/// Trimmed mean of one window of solves.
///
/// `window_start` and `window_end` are inclusive indices into the time
/// sequence the window was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowResult {
    pub average_ms: NormalizedTime,
    pub window_start: usize,
    pub window_end: usize,
}

impl WindowResult {
    /// Number of solves in the window.
    pub fn size(&self) -> usize {
        self.window_end + 1 - self.window_start
    }

    /// Whether `index` is one of the solves making up this average.
    pub fn contains(&self, index: usize) -> bool {
        (self.window_start..=self.window_end).contains(&index)
    }
}

/// WCA average of `times[start..start + size]`.
///
/// One fastest and one slowest result are dropped and the rest are averaged.
/// A single DNF is the slowest result; two or more DNFs make the whole
/// average DNF. Windows that do not fit in `times`, or are too small to
/// trim (size < 3), are DNF.
pub fn average_window(times: &[NormalizedTime], start: usize, size: usize) -> WindowResult {
    let window_end = start.saturating_add(size).saturating_sub(1);
    let dnf = WindowResult {
        average_ms: NormalizedTime::Dnf,
        window_start: start,
        window_end,
    };

    if size < 3 {
        return dnf;
    }
    let Some(window) = start.checked_add(size).and_then(|end| times.get(start..end)) else {
        return dnf;
    };

    let mut finished: Vec<f64> = window.iter().filter_map(NormalizedTime::ms).collect();
    let dnf_count = size - finished.len();
    if dnf_count >= 2 {
        return dnf;
    }

    finished.sort_by(f64::total_cmp);
    let counted = if dnf_count == 1 {
        // the DNF is the dropped slowest result
        &finished[1..]
    } else {
        &finished[1..finished.len() - 1]
    };

    let sum: f64 = counted.iter().sum();
    WindowResult {
        average_ms: NormalizedTime::Finished(sum / (size - 2) as f64),
        window_start: start,
        window_end,
    }
}
