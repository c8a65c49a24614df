//! Integration tests for the Lockup vault module.

use lockup::crypto::SaltStore;
use lockup::errors::LockupError;
use lockup::session::Session;
use lockup::vault::{store, Authenticator, Database, VaultStore};
use tempfile::TempDir;

const MASTER: &[u8] = b"Tr0ub4dor&3";

/// Helper: paths for a fresh on-disk vault inside a temp dir.
fn vault_dir() -> (TempDir, std::path::PathBuf, SaltStore) {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("lockup.db");
    let salt = SaltStore::new(dir.path().join("salt.key"));
    (dir, db_path, salt)
}

fn fresh_store() -> (TempDir, VaultStore) {
    let (dir, db_path, salt) = vault_dir();
    let db = Database::open(&db_path).unwrap();
    let store = VaultStore::initialize(db, &salt, MASTER).unwrap();
    (dir, store)
}

// ---------------------------------------------------------------------------
// Master password lifecycle
// ---------------------------------------------------------------------------

#[test]
fn initialize_then_unlock() {
    let (_dir, db_path, salt) = vault_dir();

    let db = Database::open(&db_path).unwrap();
    assert!(!Authenticator::new(&db).exists().unwrap());
    drop(VaultStore::initialize(db, &salt, MASTER).unwrap());
    assert!(salt.exists());

    let db = store::open_existing(&db_path).unwrap();
    assert!(Authenticator::new(&db).verify(MASTER).unwrap());
    assert!(!Authenticator::new(&db).verify(b"wrong").unwrap());
    VaultStore::unlock(db, &salt, MASTER).expect("unlock with right password");
}

#[test]
fn unlock_with_wrong_password_fails() {
    let (_dir, db_path, salt) = vault_dir();
    drop(VaultStore::initialize(Database::open(&db_path).unwrap(), &salt, MASTER).unwrap());

    let db = store::open_existing(&db_path).unwrap();
    let result = VaultStore::unlock(db, &salt, b"not-it");
    assert!(matches!(result, Err(LockupError::WrongMasterPassword)));
}

#[test]
fn unlock_without_master_password_fails() {
    let (_dir, db_path, salt) = vault_dir();
    let db = Database::open(&db_path).unwrap();
    let result = VaultStore::unlock(db, &salt, MASTER);
    assert!(matches!(result, Err(LockupError::MasterPasswordNotSet)));
}

#[test]
fn initialize_twice_fails() {
    let (_dir, db_path, salt) = vault_dir();
    drop(VaultStore::initialize(Database::open(&db_path).unwrap(), &salt, MASTER).unwrap());

    let db = Database::open(&db_path).unwrap();
    let result = VaultStore::initialize(db, &salt, b"another");
    assert!(matches!(result, Err(LockupError::MasterPasswordAlreadySet)));

    // The original password still works.
    let db = Database::open(&db_path).unwrap();
    assert!(Authenticator::new(&db).verify(MASTER).unwrap());
}

#[test]
fn open_existing_reports_missing_vault() {
    let (_dir, db_path, _salt) = vault_dir();
    let result = store::open_existing(&db_path);
    assert!(matches!(result, Err(LockupError::VaultNotFound(_))));
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[test]
fn add_and_read_back() {
    let (_dir, store) = fresh_store();

    let id = store.add("github.com", "alice", "S3cret!").unwrap();
    let records = store.get_all().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id, id);
    assert_eq!(record.service, "github.com");
    assert_eq!(record.username, "alice");
    assert_ne!(record.password, "S3cret!", "password must be stored encrypted");
    assert_eq!(store.reveal_password(record).unwrap(), "S3cret!");
}

#[test]
fn ids_are_assigned_in_order() {
    let (_dir, store) = fresh_store();
    let a = store.add("a.example", "u", "p1").unwrap();
    let b = store.add("b.example", "u", "p2").unwrap();
    assert!(b > a);

    let services: Vec<_> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(|r| r.service)
        .collect();
    assert_eq!(services, vec!["a.example", "b.example"]);
}

#[test]
fn get_by_id_missing_is_none() {
    let (_dir, store) = fresh_store();
    assert!(store.get_by_id(42).unwrap().is_none());
}

#[test]
fn add_rejects_invalid_fields() {
    let (_dir, store) = fresh_store();
    for (service, username, password) in [
        ("", "alice", "pw"),
        ("github.com", "  ", "pw"),
        ("git,hub", "alice", "pw"),
        ("github.com", "al\nice", "pw"),
        ("github.com", "alice", ""),
    ] {
        let result = store.add(service, username, password);
        assert!(
            matches!(result, Err(LockupError::InvalidField(_))),
            "{service:?}/{username:?} should be rejected"
        );
    }
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn update_replaces_fields() {
    let (_dir, store) = fresh_store();
    let id = store.add("github.com", "alice", "S3cret!").unwrap();

    store.update(id, "gitlab.com", "alice2", "N3w!").unwrap();

    let record = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(record.service, "gitlab.com");
    assert_eq!(record.username, "alice2");
    assert_eq!(store.reveal_password(&record).unwrap(), "N3w!");
}

#[test]
fn update_missing_record_fails() {
    let (_dir, store) = fresh_store();
    let result = store.update(99, "x", "y", "z");
    assert!(matches!(result, Err(LockupError::RecordNotFound(99))));
}

#[test]
fn delete_is_idempotent() {
    let (_dir, store) = fresh_store();
    let id = store.add("github.com", "alice", "S3cret!").unwrap();

    assert!(store.delete(id).unwrap());
    assert!(!store.delete(id).unwrap());
    assert!(store.get_by_id(id).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn records_survive_reopen() {
    let (_dir, db_path, salt) = vault_dir();
    {
        let store =
            VaultStore::initialize(Database::open(&db_path).unwrap(), &salt, MASTER).unwrap();
        store.add("github.com", "alice", "S3cret!").unwrap();
    }

    let store = VaultStore::unlock(store::open_existing(&db_path).unwrap(), &salt, MASTER).unwrap();
    let records = store.get_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(store.reveal_password(&records[0]).unwrap(), "S3cret!");
}

#[test]
fn replaced_salt_makes_passwords_unreadable() {
    let (_dir, db_path, salt) = vault_dir();
    {
        let store =
            VaultStore::initialize(Database::open(&db_path).unwrap(), &salt, MASTER).unwrap();
        store.add("github.com", "alice", "S3cret!").unwrap();
    }
    std::fs::write(salt.path(), [0xEEu8; 16]).unwrap();

    let store = VaultStore::unlock(store::open_existing(&db_path).unwrap(), &salt, MASTER).unwrap();
    let record = &store.get_all().unwrap()[0];
    assert!(matches!(
        store.reveal_password(record),
        Err(LockupError::DecryptionFailed)
    ));
}

// ---------------------------------------------------------------------------
// Master password reset
// ---------------------------------------------------------------------------

#[test]
fn reset_password_reencrypts_every_record() {
    let (_dir, db_path, salt) = vault_dir();
    let mut store =
        VaultStore::initialize(Database::open(&db_path).unwrap(), &salt, MASTER).unwrap();
    store.add("github.com", "alice", "S3cret!").unwrap();
    store.add("mail.example", "bob", "hunter2").unwrap();
    let before = store.get_all().unwrap();
    let salt_before = *store.session().salt();

    let count = store.reset_master_password(b"correct horse").unwrap();
    assert_eq!(count, 2);
    assert_eq!(store.session().salt(), &salt_before);

    // The live store already uses the new keys.
    let after = store.get_all().unwrap();
    assert_ne!(before[0].password, after[0].password);
    assert_eq!(store.reveal_password(&after[1]).unwrap(), "hunter2");
    drop(store);

    // Old password no longer unlocks; new one does.
    let db = store::open_existing(&db_path).unwrap();
    assert!(matches!(
        VaultStore::unlock(db, &salt, MASTER),
        Err(LockupError::WrongMasterPassword)
    ));
    let db = store::open_existing(&db_path).unwrap();
    let store = VaultStore::unlock(db, &salt, b"correct horse").unwrap();
    let records = store.get_all().unwrap();
    assert_eq!(store.reveal_password(&records[0]).unwrap(), "S3cret!");

    // Tokens from the old session no longer decrypt.
    let old = Session::derive(MASTER, &salt_before).unwrap();
    assert!(old.cipher().decrypt(&records[0].password).is_err());
}

#[test]
fn reset_password_on_empty_vault() {
    let (_dir, mut store) = fresh_store();
    assert_eq!(store.reset_master_password(b"new").unwrap(), 0);
    assert!(Authenticator::new(store.database()).verify(b"new").unwrap());
}
