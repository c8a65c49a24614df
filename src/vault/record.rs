//! Credential rows as stored in the `passwords` table.

use rusqlite::Row;

/// Timestamp shape of `last_updated` (the SQLite `datetime('now')` form, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single stored credential.
///
/// `password` is the cipher token exactly as persisted; decrypt it with
/// `VaultStore::reveal_password` when the plaintext is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: i64,
    pub service: String,
    pub username: String,
    pub password: String,
    pub last_updated: String,
}

impl CredentialRecord {
    pub(crate) const COLUMNS: &'static str = "id, service, username, password, last_updated";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            service: row.get(1)?,
            username: row.get(2)?,
            password: row.get(3)?,
            last_updated: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        })
    }
}
