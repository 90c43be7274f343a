//! SQLite-based solve and blog storage.
//!
//! Provides persistent storage for:
//! - Logged solves (raw times kept exactly as entered or imported)
//! - Blog posts

use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use crate::blog::Post;
use crate::error::{DatabaseError, Result};
use crate::solve::{RawTime, Solve};

const SOLVE_COLUMNS: &str =
    "id, time, time_with_penalty, date, number, timestamp, scramble, notes";
const POST_COLUMNS: &str = "id, title, category, tags, content, is_private, date, timestamp";

/// SQLite database for the solve log and blog.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/cubelog/cubelog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("cubelog.db"))
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS solves (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                time              TEXT,
                time_with_penalty TEXT,
                date              TEXT NOT NULL DEFAULT '',
                number            INTEGER,
                timestamp         INTEGER,
                scramble          TEXT NOT NULL DEFAULT '',
                notes             TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS posts (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                title      TEXT NOT NULL,
                category   TEXT NOT NULL DEFAULT '',
                tags       TEXT NOT NULL DEFAULT '[]',
                content    TEXT NOT NULL DEFAULT '',
                is_private INTEGER NOT NULL DEFAULT 0,
                date       TEXT NOT NULL DEFAULT '',
                timestamp  INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_solves_timestamp ON solves(timestamp);
            CREATE INDEX IF NOT EXISTS idx_posts_timestamp ON posts(timestamp);",
        )
    }

    // ── Solves ───────────────────────────────────────────────────────

    /// Insert a solve and return its new id. The solve's own `id` is ignored.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn add_solve(&self, solve: &Solve) -> Result<i64> {
        insert_solve(&self.conn, solve)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert many solves in one transaction.
    ///
    /// # Errors
    /// Returns an error if any insert fails; nothing is written in that case.
    pub fn append_solves(&self, solves: &[Solve]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for solve in solves {
            insert_solve(&tx, solve)?;
        }
        tx.commit()?;
        tracing::debug!(count = solves.len(), "appended solves");
        Ok(solves.len())
    }

    /// Replace the whole solve log.
    ///
    /// # Errors
    /// Returns an error if the delete or any insert fails; the old log is
    /// kept in that case.
    pub fn replace_solves(&self, solves: &[Solve]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM solves", [])?;
        for solve in solves {
            insert_solve(&tx, solve)?;
        }
        tx.commit()?;
        tracing::debug!(count = solves.len(), "replaced solve log");
        Ok(solves.len())
    }

    /// # Errors
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_solve(&self, id: i64) -> Result<Option<Solve>> {
        let sql = format!("SELECT {SOLVE_COLUMNS} FROM solves WHERE id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![id], solve_from_row)
            .optional()?)
    }

    /// Returns whether a solve was deleted.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete_solve(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM solves WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// All solves, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_solves(&self) -> Result<Vec<Solve>> {
        let sql = format!(
            "SELECT {SOLVE_COLUMNS} FROM solves ORDER BY COALESCE(timestamp, 0) DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], solve_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn count_solves(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM solves", [], |row| row.get(0))?)
    }

    // ── Key-value ────────────────────────────────────────────────────

    /// Get a value from the kv store.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?)
    }

    /// Set a value in the kv store.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // ── Posts ────────────────────────────────────────────────────────

    /// Insert a post and return its new id. The post's own `id` is ignored.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn add_post(&self, post: &Post) -> Result<i64> {
        insert_post(&self.conn, post)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite the stored post with `post.id`. Returns whether it existed.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn update_post(&self, post: &Post) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE posts
             SET title = ?2, category = ?3, tags = ?4, content = ?5,
                 is_private = ?6, date = ?7, timestamp = ?8
             WHERE id = ?1",
            params![
                post.id,
                post.title,
                post.category,
                encode_json(&post.tags)?,
                post.content,
                post.is_private,
                post.date,
                post.timestamp,
            ],
        )?;
        Ok(changed > 0)
    }

    /// # Errors
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![id], post_from_row)
            .optional()?)
    }

    /// Returns whether a post was deleted.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete_post(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// All posts, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY timestamp DESC, id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], post_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Replace every post.
    ///
    /// # Errors
    /// Returns an error if the delete or any insert fails; the old posts are
    /// kept in that case.
    pub fn replace_posts(&self, posts: &[Post]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM posts", [])?;
        for post in posts {
            insert_post(&tx, post)?;
        }
        tx.commit()?;
        tracing::debug!(count = posts.len(), "replaced posts");
        Ok(posts.len())
    }
}

fn insert_solve(conn: &Connection, solve: &Solve) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO solves (time, time_with_penalty, date, number, timestamp, scramble, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            solve.time.as_ref().map(encode_json).transpose()?,
            solve.time_with_penalty.as_ref().map(encode_json).transpose()?,
            solve.date,
            solve.number,
            solve.timestamp,
            solve.scramble,
            solve.notes,
        ],
    )?;
    Ok(())
}

fn insert_post(conn: &Connection, post: &Post) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO posts (title, category, tags, content, is_private, date, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            post.title,
            post.category,
            encode_json(&post.tags)?,
            post.content,
            post.is_private,
            post.date,
            post.timestamp,
        ],
    )?;
    Ok(())
}

fn solve_from_row(row: &Row<'_>) -> rusqlite::Result<Solve> {
    Ok(Solve {
        id: row.get(0)?,
        time: decode_json_opt::<RawTime>(row, 1)?,
        time_with_penalty: decode_json_opt::<RawTime>(row, 2)?,
        date: row.get(3)?,
        number: row.get(4)?,
        timestamp: row.get(5)?,
        scramble: row.get(6)?,
        notes: row.get(7)?,
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        tags: decode_json_opt(row, 3)?.unwrap_or_default(),
        content: row.get(4)?,
        is_private: row.get(5)?,
        date: row.get(6)?,
        timestamp: row.get(7)?,
    })
}

fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, rusqlite::Error> {
    serde_json::to_string(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn decode_json_opt<T: serde::de::DeserializeOwned>(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let Some(text) = row.get::<_, Option<String>>(idx)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::parse_tags;
    use tempfile::TempDir;

    fn entry(time: &str, date: &str) -> Solve {
        Solve::new_entry(time, date).unwrap()
    }

    #[test]
    fn record_and_query() {
        let db = Database::open_memory().unwrap();
        let id = db.add_solve(&entry("12.5", "2024-03-01T10:00")).unwrap();
        let stored = db.get_solve(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.time, Some(RawTime::Seconds(12.5)));
        assert_eq!(stored.time_with_penalty, Some(RawTime::Seconds(12.5)));
        assert_eq!(db.count_solves().unwrap(), 1);
    }

    #[test]
    fn raw_text_times_survive() {
        let db = Database::open_memory().unwrap();
        let mut solve = entry("DNF", "2024-03-01T10:00");
        solve.time_with_penalty = None;
        solve.notes = "pop".into();
        let id = db.add_solve(&solve).unwrap();
        let stored = db.get_solve(id).unwrap().unwrap();
        assert_eq!(stored.time, Some(RawTime::Text("DNF".into())));
        assert_eq!(stored.time_with_penalty, None);
        assert_eq!(stored.notes, "pop");
    }

    #[test]
    fn lists_newest_first() {
        let db = Database::open_memory().unwrap();
        db.add_solve(&entry("10", "2024-03-01T10:00")).unwrap();
        db.add_solve(&entry("11", "2024-03-03T10:00")).unwrap();
        db.add_solve(&entry("12", "2024-03-02T10:00")).unwrap();
        let times: Vec<Option<RawTime>> = db.list_solves().unwrap().into_iter().map(|s| s.time).collect();
        assert_eq!(
            times,
            vec![
                Some(RawTime::Seconds(11.0)),
                Some(RawTime::Seconds(12.0)),
                Some(RawTime::Seconds(10.0)),
            ]
        );
    }

    #[test]
    fn delete_and_replace() {
        let db = Database::open_memory().unwrap();
        let id = db.add_solve(&entry("10", "2024-03-01T10:00")).unwrap();
        assert!(db.delete_solve(id).unwrap());
        assert!(!db.delete_solve(id).unwrap());
        assert!(db.get_solve(id).unwrap().is_none());

        db.append_solves(&[entry("1", "2024-01-01"), entry("2", "2024-01-02")]).unwrap();
        assert_eq!(db.count_solves().unwrap(), 2);
        db.replace_solves(&[entry("3", "2024-01-03")]).unwrap();
        assert_eq!(db.count_solves().unwrap(), 1);
    }

    #[test]
    fn post_crud() {
        let db = Database::open_memory().unwrap();
        let post = Post::new("First sub-15", "milestone", parse_tags("pb, 3x3"), "body", false).unwrap();
        let id = db.add_post(&post).unwrap();

        let mut stored = db.get_post(id).unwrap().unwrap();
        assert_eq!(stored.tags, vec!["pb", "3x3"]);
        stored.is_private = true;
        assert!(db.update_post(&stored).unwrap());
        assert!(db.get_post(id).unwrap().unwrap().is_private);

        assert_eq!(db.list_posts().unwrap().len(), 1);
        assert!(db.delete_post(id).unwrap());
        assert!(db.list_posts().unwrap().is_empty());
        assert!(!db.update_post(&stored).unwrap());
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("last_import").unwrap().is_none());
        db.kv_set("last_import", "a").unwrap();
        db.kv_set("last_import", "b").unwrap();
        assert_eq!(db.kv_get("last_import").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn persists_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cubelog.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.add_solve(&entry("9.99", "2024-03-01T10:00")).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.list_solves().unwrap().len(), 1);
    }
}
