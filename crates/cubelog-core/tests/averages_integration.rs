//! Integration tests for the averaging engine over stored solve logs.
//!
//! Solves go through the database and the backup formats before the best
//! averages are computed, the same path the CLI takes.

use cubelog_core::average::current_average_of;
use cubelog_core::storage::transfer::{export_solves, import_csv, import_json, solves_to_csv};
use cubelog_core::time::format;
use cubelog_core::{compute_best_averages, Database, RawTime, SessionSummary, Solve};

fn entry(time: &str, minute: usize) -> Solve {
    Solve::new_entry(time, &format!("2024-02-01T09:{minute:02}")).unwrap()
}

fn log(db: &Database, times: &[&str]) {
    for (i, time) in times.iter().enumerate() {
        db.add_solve(&entry(time, i)).unwrap();
    }
}

#[test]
fn test_stored_log_end_to_end() {
    let db = Database::open_memory().unwrap();
    log(&db, &["10", "11", "9", "12", "8"]);

    // Newest-first storage order must not affect the result
    let solves = db.list_solves().unwrap();
    assert_eq!(solves[0].time, Some(RawTime::Seconds(8.0)));

    let best = compute_best_averages(&solves);
    let ao5 = best.ao5.unwrap();
    assert_eq!(ao5.window_start, 0);
    assert_eq!(ao5.window_end, 4);
    assert_eq!(format(ao5.average_ms), "10.00");
    assert!(best.ao12.is_none());
}

#[test]
fn test_dnf_handling_through_storage() {
    let db = Database::open_memory().unwrap();
    log(
        &db,
        &["10", "DNF", "12", "11", "13", "DNF", "DNF", "9", "10", "11", "12", "10"],
    );

    let best = compute_best_averages(&db.list_solves().unwrap());
    // Windows holding two DNFs never win; the only ao12 holds three
    let ao5 = best.ao5.unwrap();
    assert_eq!(ao5.window_start, 7);
    assert_eq!(format(ao5.average_ms), "10.33");
    assert!(best.ao12.is_none());
}

#[test]
fn test_summary_over_stored_log() {
    let db = Database::open_memory().unwrap();
    log(&db, &["10", "DNF", "12", "14", "DNF", "11", "13"]);

    let summary = SessionSummary::from_solves(&db.list_solves().unwrap());
    assert_eq!(summary.total_solves, 7);
    assert_eq!(summary.dnf_count, 2);
    assert_eq!(summary.best_ms, Some(10000.0));
    assert_eq!(summary.worst_ms, Some(14000.0));
    assert_eq!(summary.mean_ms, Some(12000.0));
}

#[test]
fn test_json_backup_restores_averages() {
    let source = Database::open_memory().unwrap();
    log(&source, &["15", "10", "12", "11", "13", "9"]);
    let before = compute_best_averages(&source.list_solves().unwrap());

    let json = export_solves(&source.list_solves().unwrap()).to_json().unwrap();
    let target = Database::open_memory().unwrap();
    log(&target, &["30"]);
    let summary = import_json(&target, &json).unwrap();
    assert_eq!(summary.solves, 6);

    let after = compute_best_averages(&target.list_solves().unwrap());
    assert_eq!(after, before);
    assert_eq!(format(after.ao5.unwrap().average_ms), "11.00");
}

#[test]
fn test_csv_backup_keeps_chronology() {
    let source = Database::open_memory().unwrap();
    log(&source, &["20", "20", "20", "20", "20", "9", "9", "9", "9", "9"]);
    let before = source.list_solves().unwrap();

    // Export from the newest-first listing, as the CLI does
    let csv = solves_to_csv(&before);
    let target = Database::open_memory().unwrap();
    let summary = import_csv(&target, &csv).unwrap();
    assert_eq!(summary.solves, 10);
    assert_eq!(summary.skipped, 0);

    let after = target.list_solves().unwrap();
    assert!(after.iter().all(|s| s.number.is_some()));
    assert_eq!(current_average_of(&after, 5), current_average_of(&before, 5));
    assert_eq!(compute_best_averages(&after), compute_best_averages(&before));
    assert_eq!(format(current_average_of(&after, 5).unwrap().average_ms), "9.00");
}
