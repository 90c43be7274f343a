//! Solve logging commands for CLI.

use clap::Subcommand;
use cubelog_core::solve::now_entry_date;
use cubelog_core::time::format;
use cubelog_core::{Config, Database, Solve, ValidationError};

use super::CmdResult;

#[derive(Subcommand)]
pub enum SolveAction {
    /// Log a solve
    Add {
        /// Time in seconds (e.g. 12.34) or DNF
        time: String,
        /// Date of the solve (default: now)
        #[arg(long)]
        date: Option<String>,
        /// Scramble used
        #[arg(long, default_value = "")]
        scramble: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List recent solves, newest first
    List {
        /// How many solves to show (default: display.recent_limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Show every solve
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Show one solve
    Show {
        /// Solve ID
        id: i64,
    },
    /// Delete a solve
    Delete {
        /// Solve ID
        id: i64,
    },
}

pub fn run(action: SolveAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        SolveAction::Add {
            time,
            date,
            scramble,
            notes,
        } => {
            let date = date.unwrap_or_else(now_entry_date);
            let mut solve = Solve::new_entry(&time, &date)?;
            solve.scramble = scramble;
            solve.notes = notes;
            solve.id = db.add_solve(&solve)?;
            println!("Solve logged: {} ({})", solve.id, format(solve.normalized()));
        }
        SolveAction::List { limit, all } => {
            let mut solves = db.list_solves()?;
            if !all {
                let limit = limit.unwrap_or_else(|| Config::load_or_default().display.recent_limit);
                solves.truncate(limit);
            }
            println!("{}", serde_json::to_string_pretty(&solves)?);
        }
        SolveAction::Show { id } => {
            let solve = db
                .get_solve(id)?
                .ok_or(ValidationError::NotFound { kind: "solve", id })?;
            println!("{}", serde_json::to_string_pretty(&solve)?);
        }
        SolveAction::Delete { id } => {
            if !db.delete_solve(id)? {
                return Err(ValidationError::NotFound { kind: "solve", id }.into());
            }
            println!("Solve deleted: {id}");
        }
    }
    Ok(())
}
