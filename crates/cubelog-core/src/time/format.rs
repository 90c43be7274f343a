use super::NormalizedTime;

/// Render a normalized time: `"DNF"`, `"12.34"` or `"1:02.35"`.
pub fn format(time: NormalizedTime) -> String {
    let Some(ms) = time.ms() else {
        return "DNF".to_string();
    };
    let total_seconds = ms / 1000.0;
    let minutes = (total_seconds / 60.0).floor();
    let seconds = total_seconds - minutes * 60.0;
    if minutes > 0.0 {
        format!("{}:{:0>5}", minutes as u64, format!("{seconds:.2}"))
    } else {
        format!("{seconds:.2}")
    }
}

/// Dashboard rendering of a plain seconds value: `"12.34s"`, `"1:02.35"`,
/// or `"--"` when there is nothing to show.
pub fn format_seconds(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite()) else {
        return "--".to_string();
    };
    let minutes = (seconds / 60.0).floor();
    let remaining = format!("{:.2}", seconds % 60.0);
    if minutes > 0.0 {
        format!("{}:{:0>5}", minutes as u64, remaining)
    } else {
        format!("{remaining}s")
    }
}
