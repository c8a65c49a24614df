//! SQLite row store backing the vault.
//!
//! Holds two tables:
//! - `users`: the single master-password verification record (`id = 1`).
//! - `passwords`: credential rows whose `password` column is a cipher token.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::errors::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY,
    password_hash TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS passwords (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    service      TEXT NOT NULL,
    username     TEXT NOT NULL,
    password     TEXT NOT NULL,
    last_updated TEXT
);";

/// An open vault database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Default file name inside the data directory.
    pub const FILE_NAME: &'static str = "lockup.db";

    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Owner-only access to the row store.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Self::with_connection(conn)
    }

    /// Open a private in-memory database (used by tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        debug!("vault schema ready");
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
