//! High-level credential operations used by CLI commands.
//!
//! `VaultStore` pairs the row store with an unlocked `Session` so the rest
//! of the application can work with calls like
//! `store.add("github.com", "alice", "S3cret!")`. Passwords are encrypted
//! before they reach SQLite and decrypted only on request.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use zeroize::Zeroize;

use super::db::Database;
use super::master::{self, Authenticator};
use super::record::{CredentialRecord, TIMESTAMP_FORMAT};
use crate::crypto::SaltStore;
use crate::errors::{LockupError, Result};
use crate::session::Session;

/// The main vault handle. Build one with `VaultStore::initialize` on first
/// run or `VaultStore::unlock` afterwards.
pub struct VaultStore {
    db: Database,
    session: Session,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Wrap an already unlocked session.
    pub fn new(db: Database, session: Session) -> Self {
        Self { db, session }
    }

    /// First-run path: set the master password, then unlock.
    pub fn initialize(db: Database, salt_store: &SaltStore, password: &[u8]) -> Result<Self> {
        Authenticator::new(&db).create_initial(password)?;
        Self::unlock(db, salt_store, password)
    }

    /// Verify the master password and open a session over `db`.
    pub fn unlock(db: Database, salt_store: &SaltStore, password: &[u8]) -> Result<Self> {
        let session = Session::unlock(&db, salt_store, password)?;
        Ok(Self { db, session })
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Encrypt and insert a credential. Returns the new record id.
    pub fn add(&self, service: &str, username: &str, password: &str) -> Result<i64> {
        validate_fields(service, username, password)?;
        let token = self.session.cipher().encrypt(password)?;
        let id = insert_row(self.db.conn(), service, username, &token, &now())?;
        debug!(id, "credential added");
        Ok(id)
    }

    /// All records in storage order.
    pub fn get_all(&self) -> Result<Vec<CredentialRecord>> {
        let sql = format!(
            "SELECT {} FROM passwords ORDER BY id",
            CredentialRecord::COLUMNS
        );
        let mut stmt = self.db.conn().prepare(&sql)?;
        let rows = stmt.query_map([], CredentialRecord::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<CredentialRecord>> {
        let sql = format!(
            "SELECT {} FROM passwords WHERE id = ?1",
            CredentialRecord::COLUMNS
        );
        let record = self
            .db
            .conn()
            .query_row(&sql, params![id], CredentialRecord::from_row)
            .optional()?;
        Ok(record)
    }

    /// Replace a record's fields, re-encrypting the password and refreshing
    /// its timestamp. Fails with `RecordNotFound` for an unknown id.
    pub fn update(&self, id: i64, service: &str, username: &str, password: &str) -> Result<()> {
        validate_fields(service, username, password)?;
        let token = self.session.cipher().encrypt(password)?;
        let changed = self.db.conn().execute(
            "UPDATE passwords
             SET service = ?1, username = ?2, password = ?3, last_updated = ?4
             WHERE id = ?5",
            params![service, username, token, now(), id],
        )?;

        if changed == 0 {
            return Err(LockupError::RecordNotFound(id));
        }
        debug!(id, "credential updated");
        Ok(())
    }

    /// Remove a record. Deleting an unknown id is not an error; the return
    /// value tells whether a row was actually removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = self
            .db
            .conn()
            .execute("DELETE FROM passwords WHERE id = ?1", params![id])?;
        debug!(id, removed, "credential delete");
        Ok(removed > 0)
    }

    /// Decrypt a record's password.
    pub fn reveal_password(&self, record: &CredentialRecord) -> Result<String> {
        self.session.cipher().decrypt(&record.password)
    }

    // ------------------------------------------------------------------
    // Master password reset
    // ------------------------------------------------------------------

    /// Change the master password.
    ///
    /// Only reachable through an unlocked store, so the current password
    /// has already been verified. Keys are re-derived from the new password
    /// and the unchanged global salt; every stored password is re-encrypted
    /// and the verification record replaced in a single transaction.
    /// Returns the number of re-encrypted records.
    pub fn reset_master_password(&mut self, new_password: &[u8]) -> Result<usize> {
        let new_session = Session::derive(new_password, self.session.salt())?;
        let records = self.get_all()?;

        let tx = self.db.conn_mut().transaction()?;
        for record in &records {
            let mut plaintext = self.session.cipher().decrypt(&record.password)?;
            let token = new_session.cipher().encrypt(&plaintext);
            plaintext.zeroize();
            let token = token?;
            tx.execute(
                "UPDATE passwords SET password = ?1 WHERE id = ?2",
                params![token, record.id],
            )?;
        }
        master::replace_record(&tx, new_password)?;
        tx.commit()?;

        self.session = new_session;
        info!(records = records.len(), "master password reset");
        Ok(records.len())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub(crate) fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .db
            .conn()
            .query_row("SELECT COUNT(*) FROM passwords", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Open the database file at `path` for a vault that must already exist.
pub fn open_existing(path: &Path) -> Result<Database> {
    if !path.exists() {
        return Err(LockupError::VaultNotFound(path.to_path_buf()));
    }
    Database::open(path)
}

/// Insert a row whose password is already a cipher token.
pub(crate) fn insert_row(
    conn: &Connection,
    service: &str,
    username: &str,
    token: &str,
    last_updated: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO passwords (service, username, password, last_updated)
         VALUES (?1, ?2, ?3, ?4)",
        params![service, username, token, last_updated],
    )?;
    Ok(conn.last_insert_rowid())
}

fn now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Validate the plaintext inputs of `add` and `update`.
///
/// `service` and `username` travel unencrypted inside the comma-separated
/// transcript tuple, so they may not contain `,` or line breaks.
pub(crate) fn validate_fields(service: &str, username: &str, password: &str) -> Result<()> {
    for (name, value) in [("service", service), ("username", username)] {
        if value.trim().is_empty() {
            return Err(LockupError::InvalidField(format!("{name} cannot be empty")));
        }
        if value.contains([',', '\n', '\r']) {
            return Err(LockupError::InvalidField(format!(
                "{name} cannot contain commas or line breaks"
            )));
        }
    }
    if password.is_empty() {
        return Err(LockupError::InvalidField("password cannot be empty".into()));
    }
    Ok(())
}
