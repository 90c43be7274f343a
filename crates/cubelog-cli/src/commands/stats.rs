use chrono::Utc;
use clap::Subcommand;
use cubelog_core::average::{best_average_of, chronological, current_average_of};
use cubelog_core::stats::{filter_by_range, progress_series, time_buckets};
use cubelog_core::time::{format, format_seconds};
use cubelog_core::{
    compute_best_averages, Config, Database, NormalizedTime, ProgressKind, SessionSummary, Solve,
    TimeRange, WindowResult,
};
use serde_json::json;

use super::CmdResult;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Dashboard summary of the whole log
    Summary,
    /// Best and current averages
    Averages {
        /// Average size; without it, best Ao5 and Ao12 are shown
        #[arg(long)]
        n: Option<usize>,
    },
    /// Running best over time
    Progress {
        /// "single" or "aoN" (default: ao<stats.trend_window>)
        #[arg(long)]
        kind: Option<ProgressKind>,
        /// "all" or a number of days (default: display.time_range)
        #[arg(long)]
        range: Option<TimeRange>,
    },
    /// Histogram of finished times
    Distribution {
        /// Number of buckets (default: stats.distribution_buckets)
        #[arg(long)]
        buckets: Option<usize>,
    },
}

/// `sorted` is the log in chronological order, which window indices refer to.
fn window_json(window: Option<WindowResult>, sorted: &[&Solve]) -> serde_json::Value {
    match window {
        Some(w) => {
            let solve_ids: Vec<i64> = sorted
                .iter()
                .enumerate()
                .filter(|(i, _)| w.contains(*i))
                .map(|(_, s)| s.id)
                .collect();
            json!({
                "average": format(w.average_ms),
                "average_ms": w.average_ms.ms(),
                "window_start": w.window_start,
                "window_end": w.window_end,
                "solve_ids": solve_ids,
            })
        }
        None => serde_json::Value::Null,
    }
}

fn ms_display(ms: Option<f64>) -> String {
    format_seconds(ms.map(|ms| ms / 1000.0))
}

pub fn run(action: StatsAction) -> CmdResult {
    let db = Database::open()?;
    let solves = db.list_solves()?;
    let sorted = chronological(&solves);

    match action {
        StatsAction::Summary => {
            let summary = SessionSummary::from_solves(&solves);
            let out = json!({
                "total_solves": summary.total_solves,
                "dnf_count": summary.dnf_count,
                "dnf_rate": summary.dnf_rate(),
                "mean": ms_display(summary.mean_ms),
                "std_dev": ms_display(summary.std_dev_ms),
                "best": ms_display(summary.best_ms),
                "worst": ms_display(summary.worst_ms),
                "best_ao5": window_json(summary.best.ao5, &sorted),
                "best_ao12": window_json(summary.best.ao12, &sorted),
                "current_ao5": window_json(summary.current_ao5, &sorted),
                "current_ao12": window_json(summary.current_ao12, &sorted),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Averages { n: None } => {
            let best = compute_best_averages(&solves);
            let out = json!({
                "ao5": window_json(best.ao5, &sorted),
                "ao12": window_json(best.ao12, &sorted),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Averages { n: Some(n) } => {
            let out = json!({
                "n": n,
                "best": window_json(best_average_of(&solves, n), &sorted),
                "current": window_json(current_average_of(&solves, n), &sorted),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Progress { kind, range } => {
            let config = Config::load_or_default();
            let kind = kind.unwrap_or(ProgressKind::BestAverageOf(config.stats.trend_window));
            let range = range.unwrap_or_else(|| config.time_range());
            let in_range = filter_by_range(&solves, range, Utc::now().timestamp_millis());
            let points: Vec<serde_json::Value> = progress_series(&in_range, kind)
                .into_iter()
                .map(|p| {
                    json!({
                        "index": p.index,
                        "date": p.date,
                        "value": format(NormalizedTime::from_ms(p.value_ms)),
                        "value_ms": p.value_ms,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        StatsAction::Distribution { buckets } => {
            let buckets =
                buckets.unwrap_or_else(|| Config::load_or_default().stats.distribution_buckets);
            let times: Vec<f64> = solves.iter().filter_map(|s| s.normalized().ms()).collect();
            println!("{}", serde_json::to_string_pretty(&time_buckets(&times, buckets))?);
        }
    }
    Ok(())
}
