//! Record storage.
//!
//! The batch run only needs two things from storage: every record, and a way
//! to persist one record's image field. `SqliteStore` provides them over a
//! table with `id`, `title` and `image` columns.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::Record;

/// Default table name for movie records
pub const DEFAULT_TABLE: &str = "movie_movie";

/// Plain SQL identifier (table names are spliced into statements, not bound)
static SQL_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Source of records and sink for updated image paths.
pub trait RecordStore {
    fn fetch_all(&self) -> Result<Vec<Record>>;

    /// Persist `record.image` for the record with `record.id`.
    fn save_image(&mut self, record: &Record) -> Result<()>;
}

/// Records stored in a SQLite table.
pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Open the database at `path` and use `table` for records.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        if !path.exists() {
            bail!("Database not found: {}", path.display());
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        Self::from_connection(conn, table)
    }

    /// Wrap an existing connection (used with in-memory databases).
    pub fn from_connection(conn: Connection, table: &str) -> Result<Self> {
        if !SQL_IDENTIFIER.is_match(table) {
            bail!("Invalid table name '{}': expected letters, digits and underscores", table);
        }
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        let sql = format!("SELECT id, title, image FROM {} ORDER BY id", self.table);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .with_context(|| format!("Failed to read records from table '{}'", self.table))?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let image: Option<String> = row.get(2)?;
            records.push(Record {
                id: row.get(0)?,
                title: row.get(1)?,
                // Django stores an unset ImageField as ''
                image: image.filter(|s| !s.is_empty()),
            });
        }
        Ok(records)
    }

    fn save_image(&mut self, record: &Record) -> Result<()> {
        let sql = format!("UPDATE {} SET image = ?1 WHERE id = ?2", self.table);
        let changed = self
            .conn
            .execute(&sql, params![record.image.as_deref().unwrap_or(""), record.id])
            .with_context(|| format!("Failed to save image for record {}", record.id))?;
        if changed == 0 {
            bail!("Record {} no longer exists in '{}'", record.id, self.table);
        }
        Ok(())
    }
}
