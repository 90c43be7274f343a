//! Progress series for trend charts.
//!
//! Each point is the best result achieved up to and including that solve,
//! so the series only ever goes down.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::average::{average_window, chronological, normalized_times};
use crate::error::ValidationError;
use crate::solve::Solve;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Time window of solves to chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[default]
    All,
    Days(u32),
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    /// `"all"`, `"30"` or `"30d"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TimeRange::All);
        }
        s.trim_end_matches(['d', 'D'])
            .parse::<u32>()
            .map(TimeRange::Days)
            .map_err(|_| ValidationError::InvalidValue {
                field: "time_range".into(),
                message: format!("expected 'all' or a number of days, got '{s}'"),
            })
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::All => f.write_str("all"),
            TimeRange::Days(days) => write!(f, "{days}d"),
        }
    }
}

/// Solves recorded within `range` of `now_ms`.
pub fn filter_by_range(solves: &[Solve], range: TimeRange, now_ms: i64) -> Vec<Solve> {
    match range {
        TimeRange::All => solves.to_vec(),
        TimeRange::Days(days) => {
            let cutoff = now_ms - i64::from(days) * DAY_MS;
            solves
                .iter()
                .filter(|s| s.epoch_ms() >= cutoff)
                .cloned()
                .collect()
        }
    }
}

/// What a progress chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    BestSingle,
    BestAverageOf(usize),
}

impl ProgressKind {
    pub const BEST_AO5: ProgressKind = ProgressKind::BestAverageOf(5);
    pub const BEST_AO12: ProgressKind = ProgressKind::BestAverageOf(12);
}

impl FromStr for ProgressKind {
    type Err = ValidationError;

    /// `"single"`, `"ao5"`, `"ao12"`, `"ao50"`...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "single" || lower == "best-single" {
            return Ok(ProgressKind::BestSingle);
        }
        lower
            .strip_prefix("ao")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n >= 3)
            .map(ProgressKind::BestAverageOf)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!("expected 'single' or 'aoN' with N >= 3, got '{s}'"),
            })
    }
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Position in chronological order.
    pub index: usize,
    pub date: String,
    pub value_ms: f64,
}

/// Running best of `kind` after each solve, in chronological order.
///
/// Solves before the first available value produce no point. Evaluated
/// incrementally: the best of a prefix is the previous best or the window
/// ending at the new solve, replaced only on strict improvement, which is
/// the same first-wins result a full search of the prefix gives.
pub fn progress_series(solves: &[Solve], kind: ProgressKind) -> Vec<ProgressPoint> {
    let sorted = chronological(solves);
    let times = normalized_times(&sorted);

    let mut best: Option<f64> = None;
    let mut points = Vec::new();
    for (i, solve) in sorted.iter().enumerate() {
        let candidate = match kind {
            ProgressKind::BestSingle => times[i].ms(),
            ProgressKind::BestAverageOf(n) if n > 0 && i + 1 >= n => {
                average_window(&times, i + 1 - n, n).average_ms.ms()
            }
            ProgressKind::BestAverageOf(_) => None,
        };
        if let Some(value) = candidate {
            if best.map_or(true, |b| value < b) {
                best = Some(value);
            }
        }
        if let Some(value_ms) = best {
            points.push(ProgressPoint {
                index: i,
                date: solve.date.clone(),
                value_ms,
            });
        }
    }
    tracing::debug!(kind = ?kind, points = points.len(), "built progress series");
    points
}
