//! One `SQLite` connection per thread, tuned for concurrent writers.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::Result;

use super::config::DatabaseConfig;

/// An open parking database.
///
/// Each thread that touches the database opens its own `Database`; the
/// connection is not shared. Writers serialize through `SQLite`'s write lock
/// and wait up to the configured busy timeout.
///
/// # Examples
///
/// ```no_run
/// use parkade::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/parkade.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens (creating if needed) the database file and brings the schema
    /// up to date.
    ///
    /// The busy timeout is applied before anything else touches the file,
    /// then WAL journaling, `synchronous = NORMAL` and foreign keys are
    /// switched on.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors creating the parent directory, `SQLite` errors,
    /// or an unsupported schema version.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // WAL needs the write lock on a fresh file.
        conn.busy_timeout(config.busy_timeout)?;
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON")?;

        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened {} (journal: {mode})", config.path.display());

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the configuration the connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Begins an IMMEDIATE transaction on the shared connection.
    ///
    /// The write lock is taken up front, so a read followed by a write inside
    /// the transaction cannot be interleaved with another writer.
    pub(crate) fn immediate(&self) -> Result<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}
