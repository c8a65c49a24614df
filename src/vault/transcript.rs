//! Authenticated export/import transcript.
//!
//! A transcript is UTF-8 text with one line per credential:
//!
//! ```text
//! <token>:<hmac-hex>
//! ```
//!
//! - **token**: the cipher token of `service,username,password,last_updated`,
//!   where `password` is the record's stored token taken verbatim (so the
//!   password is encrypted twice).
//! - **hmac-hex**: HMAC-SHA256 under the session HMAC key over the token's
//!   UTF-8 bytes, lowercase hex.
//!
//! There is no header, version or record count. A transcript can only be
//! read back by a vault holding the same master password and global salt.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::info;
use zeroize::Zeroize;

use super::record::CredentialRecord;
use super::store::{insert_row, VaultStore};
use crate::crypto::HmacKey;
use crate::errors::{LockupError, Result};
use crate::session::Session;

/// Separates the fields of the encrypted tuple.
const FIELD_SEPARATOR: &str = ",";

/// Separates the token from its HMAC tag.
const TAG_SEPARATOR: char = ':';

/// service, username, password token, last_updated.
const TUPLE_FIELDS: usize = 4;

/// Hex length of an HMAC-SHA256 tag.
const TAG_HEX_LEN: usize = 64;

/// One validated transcript entry, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub service: String,
    pub username: String,
    /// Cipher token of the password, as it will be stored.
    pub password: String,
    pub last_updated: String,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Encode one record as a transcript line.
pub fn encode_line(session: &Session, record: &CredentialRecord) -> Result<String> {
    let tuple = [
        record.service.as_str(),
        record.username.as_str(),
        record.password.as_str(),
        record.last_updated.as_str(),
    ]
    .join(FIELD_SEPARATOR);

    let token = session.cipher().encrypt(&tuple)?;
    let tag = compute_tag(session.hmac_key(), token.as_bytes())?;
    Ok(format!("{token}{TAG_SEPARATOR}{tag}"))
}

/// Render every record in storage order as a transcript.
pub fn export_transcript(store: &VaultStore) -> Result<String> {
    Ok(export_lines(store)?.join("\n"))
}

fn export_lines(store: &VaultStore) -> Result<Vec<String>> {
    store
        .get_all()?
        .iter()
        .map(|record| encode_line(store.session(), record))
        .collect()
}

/// Write the transcript to `path` **atomically**. Returns the record count.
///
/// The text goes to an owner-only temp file in the same directory which is
/// then renamed over the target, so readers never see a half-written file.
/// The temp file is removed if any step fails.
pub fn export_to_file(store: &VaultStore, path: &Path) -> Result<usize> {
    let lines = export_lines(store)?;
    let count = lines.len();
    let transcript = lines.join("\n");

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    // A leftover from an interrupted export must not keep its old mode.
    match fs::remove_file(&tmp_path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    if let Err(e) = write_private(&tmp_path, transcript.as_bytes())
        .and_then(|()| fs::rename(&tmp_path, path))
    {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!(records = count, path = %path.display(), "exported transcript");
    Ok(count)
}

/// Create `path` with mode 0o600 (on Unix) and write `data` to it.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Parse and authenticate one line (`line_no` is 1-based, for errors).
pub fn decode_line(session: &Session, line_no: usize, line: &str) -> Result<TranscriptEntry> {
    let (token, received_tag) =
        line.split_once(TAG_SEPARATOR)
            .ok_or_else(|| LockupError::TranscriptParse {
                line: line_no,
                reason: "missing ':' separator".into(),
            })?;

    if received_tag.contains(TAG_SEPARATOR) {
        return Err(LockupError::TranscriptParse {
            line: line_no,
            reason: "more than one ':' separator".into(),
        });
    }

    verify_tag(session.hmac_key(), token.as_bytes(), received_tag)
        .map_err(|_| LockupError::IntegrityFailed { line: line_no })?;

    let tuple = session.cipher().decrypt(token)?;
    let fields: Vec<&str> = tuple.split(FIELD_SEPARATOR).collect();
    if fields.len() != TUPLE_FIELDS {
        return Err(LockupError::TranscriptFormat {
            line: line_no,
            fields: fields.len(),
        });
    }

    // The embedded password must be readable under this vault's key.
    let mut check = session.cipher().decrypt(fields[2])?;
    check.zeroize();

    Ok(TranscriptEntry {
        service: fields[0].to_string(),
        username: fields[1].to_string(),
        password: fields[2].to_string(),
        last_updated: fields[3].to_string(),
    })
}

/// Import a whole transcript inside one transaction.
///
/// Every line gets a fresh record id. The first failing line aborts the
/// import and rolls back all rows inserted before it. Returns the number of
/// inserted records.
pub fn import_transcript(store: &mut VaultStore, transcript: &str) -> Result<usize> {
    let mut entries = Vec::new();
    for (idx, line) in transcript.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        entries.push(decode_line(store.session(), idx + 1, line)?);
    }

    let tx = store.database_mut().conn_mut().transaction()?;
    for entry in &entries {
        insert_row(
            &tx,
            &entry.service,
            &entry.username,
            &entry.password,
            &entry.last_updated,
        )?;
    }
    tx.commit()?;

    info!(records = entries.len(), "imported transcript");
    Ok(entries.len())
}

/// Read `path` and import it. See `import_transcript`.
pub fn import_from_file(store: &mut VaultStore, path: &Path) -> Result<usize> {
    let transcript = fs::read_to_string(path)?;
    import_transcript(store, &transcript)
}

// ---------------------------------------------------------------------------
// HMAC helpers
// ---------------------------------------------------------------------------

/// HMAC-SHA256 of `data` as lowercase hex.
pub fn compute_tag(key: &HmacKey, data: &[u8]) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .map_err(|e| LockupError::HmacError(format!("invalid HMAC key: {e}")))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a hex tag using `Mac::verify_slice`, which compares in constant
/// time. Only the exact form `compute_tag` emits (64 lowercase hex digits)
/// is accepted; anything else counts as a mismatch.
fn verify_tag(key: &HmacKey, data: &[u8], tag_hex: &str) -> Result<()> {
    if tag_hex.len() != TAG_HEX_LEN
        || !tag_hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return Err(LockupError::HmacError("tag is not lowercase hex".into()));
    }

    let tag = hex::decode(tag_hex).map_err(|_| LockupError::HmacError("tag is not hex".into()))?;

    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .map_err(|e| LockupError::HmacError(format!("invalid HMAC key: {e}")))?;
    mac.update(data);
    mac.verify_slice(&tag)
        .map_err(|_| LockupError::HmacError("tag mismatch".into()))
}
