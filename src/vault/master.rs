//! Master-password authenticator.
//!
//! The vault is UNINITIALIZED until the single verification record
//! (`users.id = 1`) exists, and INITIALIZED afterwards. The record is only
//! ever replaced through `VaultStore::reset_master_password`, which first
//! requires an unlocked session.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::db::Database;
use crate::crypto::kdf;
use crate::errors::{LockupError, Result};

/// Fixed row id of the verification record.
const MASTER_ROW_ID: i64 = 1;

/// Checks and creates the master-password verification record.
pub struct Authenticator<'a> {
    conn: &'a Connection,
}

impl<'a> Authenticator<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { conn: db.conn() }
    }

    /// Returns `true` once a master password has been set.
    pub fn exists(&self) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![MASTER_ROW_ID],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Set the master password on first run.
    ///
    /// Fails with `MasterPasswordAlreadySet` if a record exists.
    pub fn create_initial(&self, password: &[u8]) -> Result<()> {
        if self.exists()? {
            return Err(LockupError::MasterPasswordAlreadySet);
        }

        let record = kdf::hash_master_password(password);
        self.conn.execute(
            "INSERT INTO users (id, password_hash) VALUES (?1, ?2)",
            params![MASTER_ROW_ID, record],
        )?;

        info!("master password set");
        Ok(())
    }

    /// Check a password attempt. Returns `false` when no record exists.
    pub fn verify(&self, password: &[u8]) -> Result<bool> {
        match stored_hash(self.conn)? {
            Some(record) => kdf::verify_master_password(password, &record),
            None => Ok(false),
        }
    }
}

fn stored_hash(conn: &Connection) -> Result<Option<String>> {
    let record = conn
        .query_row(
            "SELECT password_hash FROM users WHERE id = ?1",
            params![MASTER_ROW_ID],
            |row| row.get(0),
        )
        .optional()?;
    Ok(record)
}

/// Replace the verification record. Only reachable from the gated reset.
pub(crate) fn replace_record(conn: &Connection, password: &[u8]) -> Result<()> {
    let record = kdf::hash_master_password(password);
    conn.execute(
        "INSERT OR REPLACE INTO users (id, password_hash) VALUES (?1, ?2)",
        params![MASTER_ROW_ID, record],
    )?;
    Ok(())
}
