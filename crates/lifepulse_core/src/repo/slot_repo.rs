//! Slot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide raw named-slot read/write/clear APIs over the `slots` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `write_slot` replaces the whole payload of one slot atomically.
//! - `clear_slot` and `clear_all_slots` are idempotent.
//! - Construction rejects connections that are not fully migrated.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Payload could not be serialized for storage.
    Encode(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode slot payload: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "slot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "slot repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Repository interface for named-slot storage.
///
/// This is the injectable persistence seam: services depend on this trait,
/// never on SQLite directly.
pub trait SlotRepository {
    /// Reads one slot's payload. Missing slots are `Ok(None)`, not errors.
    fn read_slot(&self, slot: &str) -> RepoResult<Option<String>>;
    /// Overwrites one slot's payload in full.
    fn write_slot(&self, slot: &str, payload: &str) -> RepoResult<()>;
    /// Removes one slot. Succeeds when nothing was stored.
    fn clear_slot(&self, slot: &str) -> RepoResult<()>;
    /// Removes every slot unconditionally.
    fn clear_all_slots(&self) -> RepoResult<()>;
}

/// SQLite-backed slot repository.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_slot_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, slot: &str) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM slots WHERE slot = ?1;")?;
        let mut rows = stmt.query(params![slot])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn write_slot(&self, slot: &str, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (slot, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![slot, payload],
        )?;
        Ok(())
    }

    fn clear_slot(&self, slot: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE slot = ?1;", params![slot])?;
        Ok(())
    }

    fn clear_all_slots(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM slots;", [])?;
        Ok(())
    }
}

fn ensure_slot_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "slots")? {
        return Err(RepoError::MissingRequiredTable("slots"));
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        params![table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
