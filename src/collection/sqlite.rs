//! SQLite Collection Driver
//!
//! Implements [`DocumentCollection`] over a single rusqlite connection. Each
//! cache entry is one row; the implicit rowid is the document's internal
//! identity and is preserved across replace-by-key, which keeps paged
//! enumeration in insertion order. Expiry instants are stored as unix
//! milliseconds so the expiry index sorts numerically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::collection::{CacheDocument, DocumentCollection, DocumentId, SortOrder};
use crate::error::{CacheError, Result};

// == SQLite Collection ==
/// A document collection backed by one SQLite table.
pub struct SqliteCollection {
    conn: Connection,
    table: String,
}

impl SqliteCollection {
    // == Constructors ==
    /// Opens (creating if absent) the database file at `path`.
    ///
    /// The collection name becomes the table name and must be a plain
    /// identifier; anything else is rejected before it can reach SQL text.
    pub fn open(path: &str, collection_name: &str) -> Result<Self> {
        validate_collection_name(collection_name)?;
        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            table: collection_name.to_string(),
        })
    }

    /// Opens a private in-memory database. Used by tests and callers that
    /// want collection semantics without a file on disk.
    #[allow(dead_code)]
    pub fn open_in_memory(collection_name: &str) -> Result<Self> {
        validate_collection_name(collection_name)?;
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            table: collection_name.to_string(),
        })
    }

    fn select_prefix(&self) -> String {
        format!(
            "SELECT rowid, key, value, expires_at FROM {}",
            self.table
        )
    }
}

#[async_trait]
impl DocumentCollection for SqliteCollection {
    async fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {t};
             CREATE TABLE {t} (
                 key TEXT NOT NULL,
                 value TEXT NOT NULL,
                 expires_at INTEGER NOT NULL
             );
             CREATE UNIQUE INDEX {t}_key_idx ON {t} (key);
             CREATE INDEX {t}_expires_at_idx ON {t} (expires_at);",
            t = self.table
        ))?;
        Ok(())
    }

    async fn count(&mut self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    async fn find_by_key(&mut self, key: &str) -> Result<Option<CacheDocument>> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE key = ?1", self.select_prefix()),
                params![key],
                row_to_parts,
            )
            .optional()?;

        row.map(document_from_parts).transpose()
    }

    async fn find_page(&mut self, skip: usize, take: usize) -> Result<Vec<CacheDocument>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} ORDER BY rowid LIMIT ?1 OFFSET ?2",
            self.select_prefix()
        ))?;

        // A usize above i64::MAX would wrap negative, which SQLite reads
        // as LIMIT unbounded / OFFSET zero; clamp instead
        let take = take.min(i64::MAX as usize) as i64;
        let skip = skip.min(i64::MAX as usize) as i64;
        let rows = stmt.query_map(params![take, skip], row_to_parts)?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(document_from_parts(row?)?);
        }
        Ok(documents)
    }

    async fn first_by_expiry(&mut self, order: SortOrder) -> Result<Option<CacheDocument>> {
        let direction = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let row = self
            .conn
            .query_row(
                &format!(
                    "{} ORDER BY expires_at {}, rowid ASC LIMIT 1",
                    self.select_prefix(),
                    direction
                ),
                [],
                row_to_parts,
            )
            .optional()?;

        row.map(document_from_parts).transpose()
    }

    async fn replace_by_key(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        // Upsert rather than delete-and-insert so the rowid, and with it the
        // entry's enumeration position, survives replacement.
        self.conn.execute(
            &format!(
                "INSERT INTO {t} (key, value, expires_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     expires_at = excluded.expires_at",
                t = self.table
            ),
            params![key, value, expires_at.timestamp_millis()],
        )?;
        Ok(())
    }

    async fn delete_by_key(&mut self, key: &str) -> Result<()> {
        self.conn.execute(
            &format!("DELETE FROM {} WHERE key = ?1", self.table),
            params![key],
        )?;
        Ok(())
    }

    async fn delete_by_id(&mut self, id: DocumentId) -> Result<()> {
        self.conn.execute(
            &format!("DELETE FROM {} WHERE rowid = ?1", self.table),
            params![id],
        )?;
        Ok(())
    }

    async fn delete_all(&mut self) -> Result<()> {
        self.conn
            .execute(&format!("DELETE FROM {}", self.table), [])?;
        Ok(())
    }
}

// == Row Mapping ==
type RowParts = (DocumentId, String, String, i64);

fn row_to_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<RowParts> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn document_from_parts((id, key, value, expires_ms): RowParts) -> Result<CacheDocument> {
    let expires_at = DateTime::from_timestamp_millis(expires_ms).ok_or_else(|| {
        CacheError::StorageUnavailable(format!("invalid expiry timestamp {expires_ms}"))
    })?;
    Ok(CacheDocument {
        id,
        key,
        value,
        expires_at,
    })
}

// == Name Validation ==
/// Collection names are spliced into SQL as identifiers, so only plain
/// identifiers are accepted.
fn validate_collection_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidRequest(format!(
            "invalid collection name '{name}'"
        )))
    }
}
