//! Backup import/export commands for CLI.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use cubelog_core::storage::transfer::{
    export_all, export_posts, export_solves, import_csv, import_json, solves_to_csv,
};
use cubelog_core::{Database, ImportError};

use super::CmdResult;

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportScope {
    Solves,
    Posts,
    All,
}

#[derive(Subcommand)]
pub enum DataAction {
    /// Export a backup
    Export {
        /// Output format
        format: ExportFormat,
        /// What to export (CSV always exports solves)
        #[arg(long, value_enum, default_value = "all")]
        what: ExportScope,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a backup; JSON replaces, CSV appends
    Import {
        /// File ending in .json or .csv
        path: PathBuf,
    },
}

pub fn run(action: DataAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        DataAction::Export { format, what, out } => {
            let text = match format {
                ExportFormat::Csv => solves_to_csv(&db.list_solves()?),
                ExportFormat::Json => {
                    let doc = match what {
                        ExportScope::Solves => export_solves(&db.list_solves()?),
                        ExportScope::Posts => export_posts(&db.list_posts()?),
                        ExportScope::All => export_all(&db.list_solves()?, &db.list_posts()?),
                    };
                    doc.to_json()?
                }
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{text}"),
            }
        }
        DataAction::Import { path } => {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            let text = std::fs::read_to_string(&path)?;
            let summary = match extension.as_str() {
                "json" => import_json(&db, &text)?,
                "csv" => import_csv(&db, &text)?,
                _ => return Err(ImportError::UnsupportedFormat(path.display().to_string()).into()),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
