//! Dashboard summary of a solve log.

use serde::{Deserialize, Serialize};

use crate::average::{
    chronological, compute_best_averages, current_window, normalized_times, BestAverages,
    WindowResult,
};
use crate::solve::Solve;

/// Aggregate numbers shown on the dashboard.
///
/// Mean, deviation, best and worst cover finished solves only; DNFs are
/// counted separately.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_solves: usize,
    pub dnf_count: usize,
    pub finished: usize,
    pub mean_ms: Option<f64>,
    /// Population standard deviation.
    pub std_dev_ms: Option<f64>,
    pub best_ms: Option<f64>,
    pub worst_ms: Option<f64>,
    pub best: BestAverages,
    pub current_ao5: Option<WindowResult>,
    pub current_ao12: Option<WindowResult>,
}

impl SessionSummary {
    pub fn from_solves(solves: &[Solve]) -> Self {
        let times = normalized_times(&chronological(solves));
        let finished: Vec<f64> = times.iter().filter_map(|t| t.ms()).collect();

        let count = finished.len();
        let (mean_ms, std_dev_ms) = if count == 0 {
            (None, None)
        } else {
            let mean = finished.iter().sum::<f64>() / count as f64;
            let variance = finished.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / count as f64;
            (Some(mean), Some(variance.sqrt()))
        };

        Self {
            total_solves: solves.len(),
            dnf_count: times.len() - count,
            finished: count,
            mean_ms,
            std_dev_ms,
            best_ms: finished.iter().copied().reduce(f64::min),
            worst_ms: finished.iter().copied().reduce(f64::max),
            best: compute_best_averages(solves),
            current_ao5: current_window(&times, 5),
            current_ao12: current_window(&times, 12),
        }
    }

    /// Share of attempts that were DNF, 0.0-1.0.
    pub fn dnf_rate(&self) -> f64 {
        if self.total_solves == 0 {
            0.0
        } else {
            self.dnf_count as f64 / self.total_solves as f64
        }
    }
}
