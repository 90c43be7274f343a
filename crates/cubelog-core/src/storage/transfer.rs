//! Backup import and export.
//!
//! Two formats are supported:
//! - A JSON document holding solves and/or blog posts. Importing it replaces
//!   each collection the document carries.
//! - CSV solve lists, either the timer-app layout
//!   `No;Time;Comment;Scramble;Date;TimewithPenalty` or the older
//!   `time,date,notes` layout. Importing CSV appends.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Database;
use crate::average::chronological;
use crate::blog::Post;
use crate::error::{ImportError, Result};
use crate::solve::{parse_date_ms, RawTime, Solve};

pub const EXPORT_VERSION: &str = "1.0";
pub const CSV_HEADER: &str = "No;Time;Comment;Scramble;Date;TimewithPenalty";
/// `kv` key holding the RFC 3339 time of the last successful import.
pub const LAST_IMPORT_KEY: &str = "last_import";

/// JSON backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solves: Option<Vec<Solve>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_posts: Option<Vec<Post>>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    EXPORT_VERSION.to_string()
}

impl ExportDocument {
    fn new(solves: Option<Vec<Solve>>, blog_posts: Option<Vec<Post>>) -> Self {
        Self {
            solves,
            blog_posts,
            export_date: Utc::now().to_rfc3339(),
            version: default_version(),
        }
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a backup document.
    ///
    /// # Errors
    /// Returns [`ImportError::MalformedJson`] if the text is not a document
    /// and [`ImportError::EmptyDocument`] if it carries neither collection.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let doc: Self = serde_json::from_str(text).map_err(ImportError::MalformedJson)?;
        if doc.solves.is_none() && doc.blog_posts.is_none() {
            return Err(ImportError::EmptyDocument);
        }
        Ok(doc)
    }
}

pub fn export_solves(solves: &[Solve]) -> ExportDocument {
    ExportDocument::new(Some(solves.to_vec()), None)
}

pub fn export_posts(posts: &[Post]) -> ExportDocument {
    ExportDocument::new(None, Some(posts.to_vec()))
}

pub fn export_all(solves: &[Solve], posts: &[Post]) -> ExportDocument {
    ExportDocument::new(Some(solves.to_vec()), Some(posts.to_vec()))
}

/// What an import wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub solves: usize,
    pub posts: usize,
    /// CSV lines that held no time.
    pub skipped: usize,
}

/// Import a JSON backup, replacing each collection it carries.
///
/// # Errors
/// Returns an error if the document is malformed or the database write
/// fails. Nothing is replaced when decoding fails.
pub fn import_json(db: &Database, text: &str) -> Result<ImportSummary> {
    let doc = ExportDocument::from_json(text)?;
    let mut summary = ImportSummary::default();
    if let Some(solves) = &doc.solves {
        summary.solves = db.replace_solves(solves)?;
    }
    if let Some(posts) = &doc.blog_posts {
        summary.posts = db.replace_posts(posts)?;
    }
    db.kv_set(LAST_IMPORT_KEY, &Utc::now().to_rfc3339())?;
    tracing::info!(solves = summary.solves, posts = summary.posts, "imported JSON backup");
    Ok(summary)
}

/// Render solves in the timer-app CSV layout, oldest first.
///
/// Unnumbered solves are numbered by chronological position, so a
/// re-imported file keeps the log's order.
pub fn solves_to_csv(solves: &[Solve]) -> String {
    let mut out = String::from(CSV_HEADER);
    for (index, solve) in chronological(solves).into_iter().enumerate() {
        let number = solve.number.unwrap_or(index as i64 + 1);
        let time = solve.time.as_ref().map(RawTime::to_string).unwrap_or_default();
        let penalty = solve
            .time_with_penalty
            .as_ref()
            .map(RawTime::to_string)
            .unwrap_or_else(|| time.clone());
        out.push('\n');
        out.push_str(&format!(
            "{number};{time};{};{};{};{penalty}",
            solve.notes, solve.scramble, solve.date
        ));
    }
    out
}

/// Solves decoded from CSV text.
#[derive(Debug, Clone, Default)]
pub struct CsvSolves {
    pub solves: Vec<Solve>,
    pub skipped: usize,
}

/// Decode CSV text in either supported layout.
///
/// # Errors
/// Returns [`ImportError::EmptyCsv`] if there is no header line.
pub fn parse_csv(text: &str) -> Result<CsvSolves, ImportError> {
    let mut lines = text.lines().enumerate();
    let header = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => line,
        _ => return Err(ImportError::EmptyCsv),
    };

    let timer_layout = header.contains(';') && header.split(';').count() >= 6;
    let separator = if header.contains(';') { ';' } else { ',' };

    let mut parsed = CsvSolves::default();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(separator).map(str::trim).collect();
        let solve = if timer_layout {
            timer_row(&cells, line_no)
        } else {
            legacy_row(&cells)
        };
        match solve {
            Some(solve) => parsed.solves.push(solve),
            None => {
                tracing::warn!(line = line_no + 1, "skipping CSV line without a time");
                parsed.skipped += 1;
            }
        }
    }
    Ok(parsed)
}

/// Import CSV text, appending to the log.
///
/// # Errors
/// Returns an error if the CSV has no header or the database write fails.
pub fn import_csv(db: &Database, text: &str) -> Result<ImportSummary> {
    let parsed = parse_csv(text)?;
    let solves = db.append_solves(&parsed.solves)?;
    db.kv_set(LAST_IMPORT_KEY, &Utc::now().to_rfc3339())?;
    tracing::info!(solves, skipped = parsed.skipped, "imported CSV");
    Ok(ImportSummary {
        solves,
        posts: 0,
        skipped: parsed.skipped,
    })
}

fn cell<'a>(cells: &[&'a str], idx: usize) -> &'a str {
    cells.get(idx).copied().unwrap_or("")
}

fn raw_time(text: &str) -> Option<RawTime> {
    (!text.is_empty()).then(|| RawTime::from_input(text))
}

/// `No;Time;Comment;Scramble;Date;TimewithPenalty`
fn timer_row(cells: &[&str], line_no: usize) -> Option<Solve> {
    let time = raw_time(cell(cells, 1))?;
    let date = match cell(cells, 4) {
        "" => Utc::now().to_rfc3339(),
        date => date.to_string(),
    };
    let number = cell(cells, 0)
        .parse::<i64>()
        .ok()
        .filter(|n| *n != 0)
        .unwrap_or(line_no as i64);
    let time_with_penalty = raw_time(cell(cells, 5)).unwrap_or_else(|| time.clone());
    Some(Solve {
        id: 0,
        timestamp: parse_date_ms(&date),
        time: Some(time),
        time_with_penalty: Some(time_with_penalty),
        date,
        number: Some(number),
        scramble: cell(cells, 3).to_string(),
        notes: cell(cells, 2).to_string(),
    })
}

/// `time,date,notes`
fn legacy_row(cells: &[&str]) -> Option<Solve> {
    let time = raw_time(cell(cells, 0))?;
    let date = cell(cells, 1).to_string();
    Some(Solve {
        id: 0,
        timestamp: parse_date_ms(&date),
        time: Some(time),
        time_with_penalty: None,
        date,
        number: None,
        scramble: String::new(),
        notes: cell(cells, 2).to_string(),
    })
}
