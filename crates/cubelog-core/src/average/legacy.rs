//! Simplified "last N" average kept for compatibility with old chart code.
//!
//! Not a WCA average: it takes plain seconds, has no notion of DNF and
//! always averages the most recent `n` values. Anything user-facing should use
//! [`super::best_window`] or [`super::current_window`] instead.

/// Mean of the most recent `n` values after dropping their single fastest
/// and single slowest. `None` when fewer than `n` values exist or `n < 3`.
pub fn recent_trimmed_mean(seconds: &[f64], n: usize) -> Option<f64> {
    if n < 3 || seconds.len() < n {
        return None;
    }
    let mut recent = seconds[seconds.len() - n..].to_vec();
    recent.sort_by(f64::total_cmp);
    let kept = &recent[1..n - 1];
    Some(kept.iter().sum::<f64>() / kept.len() as f64)
}
