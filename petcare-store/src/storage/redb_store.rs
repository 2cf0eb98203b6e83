//! redb-based backend
//!
//! A single table maps collection keys to their serialized JSON arrays.
//! Each `set` is its own write transaction, so a collection is always either
//! the old or the new array on disk, never a mix.

use super::{CollectionStore, StorageResult};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Collections table: key = collection key, value = JSON
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// File-backed store
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create the table up front so read transactions never miss it
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl CollectionStore for RedbStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            let removed = table.remove(key)?;
            removed.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        let mut keys = Vec::new();
        for result in table.iter()? {
            let (key, _) = result?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{read_collection, write_collection};

    #[test]
    fn test_redb_store_crud() {
        let store = RedbStore::open_in_memory().unwrap();
        assert_eq!(store.get("petcare:pets").unwrap(), None);

        store.set("petcare:pets", b"[]").unwrap();
        assert_eq!(store.get("petcare:pets").unwrap(), Some(b"[]".to_vec()));
        assert_eq!(store.keys().unwrap(), vec!["petcare:pets".to_string()]);

        assert!(store.remove("petcare:pets").unwrap());
        assert!(!store.remove("petcare:pets").unwrap());
    }

    #[test]
    fn test_redb_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("petcare.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            write_collection(&store, "petcare:hotels", &["a", "b"]).unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        let hotels: Vec<String> = read_collection(&store, "petcare:hotels");
        assert_eq!(hotels, vec!["a".to_string(), "b".to_string()]);
    }
}
