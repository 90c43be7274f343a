use super::window::{average_window, WindowResult};
use crate::time::NormalizedTime;

/// Best (lowest) WCA average over every window of `size` consecutive times.
///
/// Returns `None` when there are fewer than `size` times or when every
/// window is DNF. On equal averages the earliest window wins.
pub fn best_window(times: &[NormalizedTime], size: usize) -> Option<WindowResult> {
    if size == 0 || times.len() < size {
        return None;
    }

    let mut best: Option<(f64, WindowResult)> = None;
    for start in 0..=times.len() - size {
        let candidate = average_window(times, start, size);
        let Some(avg) = candidate.average_ms.ms() else {
            continue;
        };
        if best.map_or(true, |(best_avg, _)| avg < best_avg) {
            best = Some((avg, candidate));
        }
    }
    best.map(|(_, result)| result)
}

/// Average of the most recent `size` times, i.e. the last window.
///
/// `None` when there are fewer than `size` times. A DNF current average is
/// returned as such rather than hidden.
pub fn current_window(times: &[NormalizedTime], size: usize) -> Option<WindowResult> {
    if size == 0 || times.len() < size {
        return None;
    }
    Some(average_window(times, times.len() - size, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_seconds;
    use proptest::prelude::*;

    fn secs(values: &[f64]) -> Vec<NormalizedTime> {
        values.iter().map(|v| parse_seconds(*v)).collect()
    }

    #[test]
    fn not_enough_times() {
        let times = secs(&[10.0, 11.0, 12.0, 13.0]);
        assert!(best_window(&times, 5).is_none());
        assert!(best_window(&[], 5).is_none());
        assert!(current_window(&times, 5).is_none());
    }

    #[test]
    fn picks_lowest_window() {
        let times = secs(&[12.0, 11.0, 13.0, 10.5, 14.0, 9.9]);
        // window 0: mean(11, 12, 13) = 12.0
        // window 1: mean(10.5, 11, 13) = 11.5
        let best = best_window(&times, 5).unwrap();
        assert_eq!(best.window_start, 1);
        assert_eq!(best.window_end, 5);
        assert_eq!(best.average_ms, NormalizedTime::Finished(11500.0));
    }

    #[test]
    fn first_window_wins_ties() {
        let times = secs(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]);
        let best = best_window(&times, 5).unwrap();
        assert_eq!(best.window_start, 0);
    }

    #[test]
    fn dnf_windows_never_win() {
        let mut times = secs(&[1.0, 1.0, 1.0]);
        times.extend([NormalizedTime::Dnf, NormalizedTime::Dnf]);
        times.extend(secs(&[20.0, 20.0, 20.0, 20.0, 20.0]));
        // window 4 holds one DNF and ties window 5; the earlier one wins
        let best = best_window(&times, 5).unwrap();
        assert_eq!(best.window_start, 4);
        assert_eq!(best.average_ms, NormalizedTime::Finished(20000.0));
    }

    #[test]
    fn all_dnf_gives_none() {
        let times = vec![NormalizedTime::Dnf; 8];
        assert!(best_window(&times, 5).is_none());
    }

    #[test]
    fn current_is_last_window() {
        let times = secs(&[5.0, 12.0, 11.0, 13.0, 10.0, 14.0]);
        let current = current_window(&times, 5).unwrap();
        assert_eq!((current.window_start, current.window_end), (1, 5));
        assert_eq!(current.average_ms, NormalizedTime::Finished(12000.0));
    }

    fn time_strategy() -> impl Strategy<Value = NormalizedTime> {
        prop_oneof![
            9 => (1u32..600_000).prop_map(|ms| NormalizedTime::Finished(ms as f64)),
            1 => Just(NormalizedTime::Dnf),
        ]
    }

    proptest! {
        #[test]
        fn best_is_minimum_of_all_windows(times in prop::collection::vec(time_strategy(), 0..40)) {
            for size in [5usize, 12] {
                let best = best_window(&times, size);
                let averages: Vec<(usize, f64)> = if times.len() < size {
                    Vec::new()
                } else {
                    (0..=times.len() - size)
                        .filter_map(|s| average_window(&times, s, size).average_ms.ms().map(|a| (s, a)))
                        .collect()
                };
                match best {
                    None => prop_assert!(averages.is_empty()),
                    Some(result) => {
                        let min = averages.iter().map(|(_, a)| *a).fold(f64::INFINITY, f64::min);
                        let first = averages.iter().find(|(_, a)| *a == min).map(|(s, _)| *s);
                        prop_assert_eq!(result.average_ms.ms(), Some(min));
                        prop_assert_eq!(Some(result.window_start), first);
                        prop_assert_eq!(result.size(), size);
                    }
                }
            }
        }

        #[test]
        fn average_lies_within_window_bounds(times in prop::collection::vec(time_strategy(), 5..6)) {
            let result = average_window(&times, 0, 5);
            if let Some(avg) = result.average_ms.ms() {
                let finished: Vec<f64> = times.iter().filter_map(NormalizedTime::ms).collect();
                let lo = finished.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = finished.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(avg >= lo && avg <= hi);
            } else {
                prop_assert!(times.iter().filter(|t| t.is_dnf()).count() >= 2);
            }
        }
    }
}
