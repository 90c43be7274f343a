//! Solve-time codec.
//!
//! Every raw solve time (a number of seconds, an `mm:ss.xx` string or a DNF
//! marker) is normalized into a [`NormalizedTime`] before it reaches the
//! averaging engine, and rendered back for display by [`format`].

mod format;
mod parse;

pub use format::{format, format_seconds};
pub use parse::{parse, parse_seconds, parse_str};

use serde::{Deserialize, Serialize};

/// A solve time in milliseconds, or DNF.
///
/// DNF is its own variant rather than a magic number, so it can never be
/// mistaken for a fast result when windows are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum NormalizedTime {
    /// Completed attempt, non-negative milliseconds.
    Finished(f64),
    /// Did not finish (or unreadable input).
    Dnf,
}

impl NormalizedTime {
    /// Wrap a millisecond value. Negative, zero and non-finite values are DNF.
    pub fn from_ms(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            NormalizedTime::Finished(ms)
        } else {
            NormalizedTime::Dnf
        }
    }

    pub fn is_dnf(&self) -> bool {
        matches!(self, NormalizedTime::Dnf)
    }

    /// Milliseconds, or `None` for DNF.
    pub fn ms(&self) -> Option<f64> {
        match self {
            NormalizedTime::Finished(ms) => Some(*ms),
            NormalizedTime::Dnf => None,
        }
    }

    /// Seconds, or `None` for DNF.
    pub fn seconds(&self) -> Option<f64> {
        self.ms().map(|ms| ms / 1000.0)
    }
}

impl From<Option<f64>> for NormalizedTime {
    fn from(value: Option<f64>) -> Self {
        value.map_or(NormalizedTime::Dnf, NormalizedTime::from_ms)
    }
}

impl From<NormalizedTime> for Option<f64> {
    fn from(value: NormalizedTime) -> Self {
        value.ms()
    }
}

impl std::fmt::Display for NormalizedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format(*self))
    }
}
