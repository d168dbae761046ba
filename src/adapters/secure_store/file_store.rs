use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs4::FileExt;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::adapters::crypto::local_identity::LocalIdentity;
use crate::adapters::protection::protected_file;
use crate::core::models::store_query::{StoreQuery, StoreStatus, StoredItem};
use crate::core::traits::secure_store::{SecureStore, StoreResult};

const STORE_FORMAT_VERSION: u32 = 1;

/// Encrypted local secure store.
///
/// All items live in one JSON document sealed to the local age identity
/// and written atomically with owner-only permissions. Every call loads
/// the document, applies one change and writes it back.
///
/// A `<store>.lock` sidecar is locked around each call: exclusive for
/// load-modify-save, shared for reads. The lock is visible to every
/// `seckit` process using the same home.
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    identity: LocalIdentity,
}

/// Held lock on the sidecar file, released on drop.
struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "cannot release store lock");
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    items: Vec<StoredItem>,
}

impl FileStore {
    pub fn new(path: PathBuf, identity: LocalIdentity) -> Self {
        let mut lock_path = OsString::from(path.as_os_str());
        lock_path.push(".lock");
        Self {
            path,
            lock_path: PathBuf::from(lock_path),
            identity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, exclusive: bool) -> StoreResult<StoreLock> {
        let unavailable = |e: std::io::Error| {
            tracing::warn!(path = %self.lock_path.display(), error = %e, "cannot lock store");
            StoreStatus::Unavailable
        };

        if let Some(parent) = self.lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(unavailable)?;

        if exclusive {
            FileExt::lock_exclusive(&file).map_err(unavailable)?;
        } else {
            FileExt::lock_shared(&file).map_err(unavailable)?;
        }
        Ok(StoreLock { file })
    }

    fn load(&self) -> StoreResult<Vec<StoredItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let sealed = std::fs::read(&self.path).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot read store");
            StoreStatus::Unavailable
        })?;

        let plain = Zeroizing::new(self.identity.open(&sealed).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot unseal store");
            StoreStatus::Corrupted
        })?);

        let doc: StoreDocument = serde_json::from_slice(&plain).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot parse store");
            StoreStatus::Corrupted
        })?;

        if doc.version > STORE_FORMAT_VERSION {
            tracing::warn!(version = doc.version, "store written by a newer seckit");
            return Err(StoreStatus::Corrupted);
        }
        Ok(doc.items)
    }

    fn save(&self, items: Vec<StoredItem>) -> StoreResult<()> {
        let doc = StoreDocument {
            version: STORE_FORMAT_VERSION,
            items,
        };
        let plain = Zeroizing::new(serde_json::to_vec(&doc).map_err(|_| StoreStatus::Corrupted)?);

        let sealed = self.identity.seal(&plain).map_err(|e| {
            tracing::warn!(error = %e, "cannot seal store");
            StoreStatus::Unavailable
        })?;

        protected_file::write_atomic(&self.path, &sealed, Some(0o600)).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot write store");
            StoreStatus::Unavailable
        })
    }

    /// Load, apply `f`, and save only when `f` succeeded.
    fn mutate(&self, f: impl FnOnce(&mut Vec<StoredItem>) -> StoreResult<()>) -> StoreResult<()> {
        let _guard = self.lock(true)?;
        let mut items = self.load()?;
        f(&mut items)?;
        self.save(items)
    }
}

impl SecureStore for FileStore {
    fn add(&self, query: &StoreQuery, payload: &[u8]) -> StoreResult<()> {
        self.mutate(|items| super::insert_item(items, query, payload))
    }

    fn copy_matching(&self, query: &StoreQuery) -> StoreResult<Vec<StoredItem>> {
        let _guard = self.lock(false)?;
        super::find_items(&self.load()?, query)
    }

    fn delete(&self, query: &StoreQuery) -> StoreResult<()> {
        self.mutate(|items| super::delete_items(items, query))
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::store_query::{MatchLimit, ReturnShape};

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let identity = LocalIdentity::generate(&dir.path().join("identity.txt")).unwrap();
        let store = FileStore::new(dir.path().join("store.age"), identity);
        (dir, store)
    }

    fn read_back(store: &FileStore, account: &str) -> StoreResult<Vec<u8>> {
        let query = StoreQuery::credential(account)
            .returning(ReturnShape::Data)
            .limit(MatchLimit::One);
        store
            .copy_matching(&query)
            .map(|mut items| items.remove(0).data)
    }

    #[test]
    fn empty_store_has_no_items() {
        let (_dir, store) = temp_store();
        assert_eq!(read_back(&store, "username"), Err(StoreStatus::ItemNotFound));
        assert!(!store.path().exists());
    }

    #[test]
    fn items_survive_reopen() {
        let (dir, store) = temp_store();
        store
            .add(&StoreQuery::credential("username"), b"alice")
            .unwrap();

        let reopened = FileStore::new(
            dir.path().join("store.age"),
            LocalIdentity::new(dir.path().join("identity.txt")),
        );
        assert_eq!(read_back(&reopened, "username").unwrap(), b"alice");
    }

    #[test]
    fn store_file_is_not_plaintext() {
        let (_dir, store) = temp_store();
        store
            .add(&StoreQuery::credential("password"), b"hunter2")
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(!raw.contains("password"));
    }

    #[test]
    fn duplicate_add_leaves_original_value() {
        let (_dir, store) = temp_store();
        let query = StoreQuery::credential("username");
        store.add(&query, b"alice").unwrap();

        assert_eq!(store.add(&query, b"bob"), Err(StoreStatus::DuplicateItem));
        assert_eq!(read_back(&store, "username").unwrap(), b"alice");
    }

    #[test]
    fn delete_removes_item() {
        let (_dir, store) = temp_store();
        let query = StoreQuery::credential("username");
        store.add(&query, b"alice").unwrap();
        store.delete(&query).unwrap();

        assert_eq!(read_back(&store, "username"), Err(StoreStatus::ItemNotFound));
        assert_eq!(store.delete(&query), Err(StoreStatus::ItemNotFound));
    }

    #[test]
    fn concurrent_writers_keep_every_item() {
        let (dir, first) = temp_store();
        let second = FileStore::new(
            dir.path().join("store.age"),
            LocalIdentity::new(dir.path().join("identity.txt")),
        );

        std::thread::scope(|s| {
            for (store, prefix) in [(&first, "a"), (&second, "b")] {
                s.spawn(move || {
                    for n in 0..20 {
                        let account = format!("{prefix}{n}");
                        store
                            .add(&StoreQuery::credential(&account), account.as_bytes())
                            .unwrap();
                    }
                });
            }
        });

        for prefix in ["a", "b"] {
            for n in 0..20 {
                let account = format!("{prefix}{n}");
                assert_eq!(read_back(&first, &account).unwrap(), account.as_bytes());
            }
        }
    }

    #[test]
    fn lock_sidecar_sits_next_to_store() {
        let (dir, store) = temp_store();
        store.add(&StoreQuery::credential("k"), b"v").unwrap();
        assert!(dir.path().join("store.age.lock").exists());
    }

    #[test]
    fn wrong_identity_reports_corrupted() {
        let (dir, store) = temp_store();
        store.add(&StoreQuery::credential("k"), b"v").unwrap();

        let other = LocalIdentity::generate(&dir.path().join("other.txt")).unwrap();
        let foreign = FileStore::new(store.path().to_path_buf(), other);
        assert_eq!(read_back(&foreign, "k"), Err(StoreStatus::Corrupted));
    }
}
