//! The global vault salt.
//!
//! Sixteen random bytes written once, the first time a session needs key
//! material, and read back unchanged for the lifetime of the vault. Losing
//! or altering the file makes every stored password and every transcript
//! unreadable, so an existing salt is never overwritten.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::kdf::{generate_salt, SALT_LEN};
use crate::errors::{LockupError, Result};

/// Location of the salt artifact.
#[derive(Debug, Clone)]
pub struct SaltStore {
    path: PathBuf,
}

impl SaltStore {
    /// Default file name inside the data directory.
    pub const FILE_NAME: &'static str = "salt.key";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Return the stored salt, creating and persisting it on first use.
    pub fn load_or_create(&self) -> Result<[u8; SALT_LEN]> {
        if let Some(salt) = self.load()? {
            return Ok(salt);
        }

        let salt = generate_salt();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // `create_new` refuses to clobber a salt written since `load`.
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        match options.open(&self.path) {
            Ok(mut file) => {
                file.write_all(&salt)?;
                file.sync_all()?;
                info!(path = %self.path.display(), "created global vault salt");
                Ok(salt)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                self.load()?.ok_or(LockupError::InvalidSalt(0))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read the salt if the file exists.
    pub fn load(&self) -> Result<Option<[u8; SALT_LEN]>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let salt: [u8; SALT_LEN] = data
            .as_slice()
            .try_into()
            .map_err(|_| LockupError::InvalidSalt(data.len()))?;
        Ok(Some(salt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_salt_once() {
        let dir = TempDir::new().unwrap();
        let store = SaltStore::new(dir.path().join(SaltStore::FILE_NAME));
        assert!(!store.exists());

        let first = store.load_or_create().unwrap();
        assert!(store.exists());
        let second = store.load_or_create().unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(store.path()).unwrap(), first.to_vec());
    }

    #[test]
    fn returns_existing_salt_unmodified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salt.key");
        fs::write(&path, [9u8; SALT_LEN]).unwrap();

        let salt = SaltStore::new(&path).load_or_create().unwrap();
        assert_eq!(salt, [9u8; SALT_LEN]);
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = SaltStore::new(dir.path().join("nested/data/salt.key"));
        store.load_or_create().unwrap();
        assert!(store.exists());
    }

    #[test]
    fn rejects_truncated_salt_without_rewriting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salt.key");
        fs::write(&path, [1u8; 5]).unwrap();

        let result = SaltStore::new(&path).load_or_create();
        assert!(matches!(result, Err(LockupError::InvalidSalt(5))));
        assert_eq!(fs::read(&path).unwrap(), vec![1u8; 5]);
    }

    #[cfg(unix)]
    #[test]
    fn salt_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = SaltStore::new(dir.path().join("salt.key"));
        store.load_or_create().unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
