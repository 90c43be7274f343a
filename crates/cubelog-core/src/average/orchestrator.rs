use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::search::{best_window, current_window};
use super::window::WindowResult;
use crate::solve::Solve;
use crate::time::NormalizedTime;

/// Best Ao5 and Ao12 of a solve log.
///
/// Window indices point into [`chronological`] order of the input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BestAverages {
    pub ao5: Option<WindowResult>,
    pub ao12: Option<WindowResult>,
}

/// Compute the best Ao5 and Ao12 of `solves`.
///
/// Pure: the result depends only on the slice contents, so callers recompute
/// after every change instead of keeping incremental state.
pub fn compute_best_averages(solves: &[Solve]) -> BestAverages {
    let times = normalized_times(&chronological(solves));
    let result = BestAverages {
        ao5: best_window(&times, 5),
        ao12: best_window(&times, 12),
    };
    tracing::debug!(
        solves = solves.len(),
        has_ao5 = result.ao5.is_some(),
        has_ao12 = result.ao12.is_some(),
        "computed best averages"
    );
    result
}

/// Best average of `n` over `solves` (the generalized Ao-N request).
pub fn best_average_of(solves: &[Solve], n: usize) -> Option<WindowResult> {
    best_window(&normalized_times(&chronological(solves)), n)
}

/// Average of the most recent `n` solves in chronological order.
pub fn current_average_of(solves: &[Solve], n: usize) -> Option<WindowResult> {
    current_window(&normalized_times(&chronological(solves)), n)
}

/// Solves in chronological order, borrowed from the input.
///
/// Two solves are compared by sequence number when both carry one, and by
/// date otherwise. Equal keys keep their input order.
pub fn chronological(solves: &[Solve]) -> Vec<&Solve> {
    let mut sorted: Vec<&Solve> = solves.iter().collect();
    merge_sort_stable(&mut sorted, |a, b| compare_chronological(a, b));
    sorted
}

/// Normalized time of each solve, in the given order.
pub fn normalized_times(solves: &[&Solve]) -> Vec<NormalizedTime> {
    solves.iter().map(|s| s.normalized()).collect()
}

fn compare_chronological(a: &Solve, b: &Solve) -> Ordering {
    match (a.number, b.number) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.epoch_ms().cmp(&b.epoch_ms()),
    }
}

/// Stable merge sort.
///
/// The sequence-number-or-date comparison is not a total order when only some
/// solves carry numbers, and `slice::sort_by` may panic on such comparators.
/// Merge sort only ever produces a permutation, whatever the comparator says.
fn merge_sort_stable<T: Copy, F>(items: &mut Vec<T>, mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut buffer: Vec<T> = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        buffer.clear();
        let mut lo = 0;
        while lo < len {
            let mid = (lo + width).min(len);
            let hi = (lo + 2 * width).min(len);
            let (mut i, mut j) = (lo, mid);
            while i < mid && j < hi {
                // take from the right run only when strictly smaller
                if cmp(&items[j], &items[i]) == Ordering::Less {
                    buffer.push(items[j]);
                    j += 1;
                } else {
                    buffer.push(items[i]);
                    i += 1;
                }
            }
            buffer.extend_from_slice(&items[i..mid]);
            buffer.extend_from_slice(&items[j..hi]);
            lo = hi;
        }
        std::mem::swap(items, &mut buffer);
        width *= 2;
    }
}
