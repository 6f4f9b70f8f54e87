use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

fn storage_err(e: impl std::fmt::Display) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore implementation backed by redb — a pure-Rust
/// embedded key-value database. Each trait method runs as a single redb
/// transaction, which is what makes `batch_set`/`batch_delete` atomic
/// across keys.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage_err)?;

        // Create the table up front so reads on a fresh database succeed.
        let write_txn = db.begin_write().map_err(storage_err)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        debug!(path = %path.display(), "opened redb store");
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage_err(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(storage_err)?;
            }
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            for key in keys {
                table.remove(*key).map_err(storage_err)?;
            }
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        let mut results = Vec::new();
        let iter = table.range(prefix..).map_err(storage_err)?;

        for entry in iter {
            let entry = entry.map_err(storage_err)?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, entry.1.value().to_vec()));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> RedbStore {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        RedbStore::open(tmp.path()).unwrap()
    }

    #[test]
    fn set_get_delete() {
        let store = open_store();

        assert!(store.get("a").unwrap().is_none());

        store.set("a", b"one").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"one".to_vec()));

        store.set("a", b"two").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"two".to_vec()));

        store.delete("a").unwrap();
        assert!(store.get("a").unwrap().is_none());

        // Deleting an absent key is fine.
        store.delete("a").unwrap();
    }

    #[test]
    fn scan_is_prefix_bounded_and_sorted() {
        let store = open_store();
        store.set("t:b", b"2").unwrap();
        store.set("t:a", b"1").unwrap();
        store.set("u:a", b"3").unwrap();

        let hits = store.scan("t:").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, "t:a");
        assert_eq!(hits[1].0, "t:b");
    }

    #[test]
    fn batch_delete_removes_every_key() {
        let store = open_store();
        store.set("x:1", b"a").unwrap();
        store.set("x:2", b"b").unwrap();
        store.set("x:3", b"c").unwrap();

        store.batch_delete(&["x:1", "x:3"]).unwrap();
        assert!(store.get("x:1").unwrap().is_none());
        assert_eq!(store.get("x:2").unwrap(), Some(b"b".to_vec()));
        assert!(store.get("x:3").unwrap().is_none());
    }

    #[test]
    fn batch_set_writes_every_entry() {
        let store = open_store();
        store
            .batch_set(&[("y:1", b"a".as_slice()), ("y:2", b"b".as_slice())])
            .unwrap();
        assert_eq!(store.get("y:1").unwrap(), Some(b"a".to_vec()));
        assert_eq!(store.get("y:2").unwrap(), Some(b"b".to_vec()));
    }
}
