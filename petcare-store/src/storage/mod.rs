//! Storage port
//!
//! Every entity type lives as ONE value: a JSON array of records stored under
//! a fixed collection key. Repositories read the whole array, modify it and
//! write the whole array back.
//!
//! # Keys
//!
//! | Key | Content |
//! |-----|---------|
//! | `petcare:users` | `Vec<User>` |
//! | `petcare:pets` | `Vec<Pet>` |
//! | `petcare:hotels` | `Vec<Hotel>` |
//! | `petcare:reservations` | `Vec<Reservation>` |
//! | `petcare:updates` | `Vec<StayUpdate>` |
//! | `petcare:auth` | `Session` marker |
//!
//! Reads fail soft: an absent key, a backend error or content that does not
//! parse as the expected array all read as an empty collection. Writes report
//! their errors.

pub mod memory;
pub mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Session marker key, written by the auth service
pub const SESSION_KEY: &str = "petcare:auth";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// The five entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Pets,
    Hotels,
    Reservations,
    StayUpdates,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Pets,
        Collection::Hotels,
        Collection::Reservations,
        Collection::StayUpdates,
    ];

    /// Storage key of this collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "petcare:users",
            Collection::Pets => "petcare:pets",
            Collection::Hotels => "petcare:hotels",
            Collection::Reservations => "petcare:reservations",
            Collection::StayUpdates => "petcare:updates",
        }
    }
}

/// Key-value backend holding serialized collections
///
/// Injected into repositories as `Arc<dyn CollectionStore>` so tests can run
/// against [`MemoryStore`] and the binary against [`RedbStore`].
pub trait CollectionStore: Send + Sync {
    /// Raw value under `key`
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrite the value under `key`
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Delete `key`, returning whether it existed
    fn remove(&self, key: &str) -> StorageResult<bool>;

    /// All keys currently present
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Read the records stored under `key`.
///
/// Never fails: absent, unreadable or malformed data reads as empty.
pub fn read_collection<T: DeserializeOwned>(store: &dyn CollectionStore, key: &str) -> Vec<T> {
    read_value(store, key).unwrap_or_default()
}

/// Serialize `items` and overwrite the value under `key`
pub fn write_collection<T: Serialize>(
    store: &dyn CollectionStore,
    key: &str,
    items: &[T],
) -> StorageResult<()> {
    let bytes = serde_json::to_vec(items)?;
    store.set(key, &bytes)?;
    tracing::debug!(key, count = items.len(), "Collection written");
    Ok(())
}

/// Read a single JSON value, failing soft like [`read_collection`]
pub fn read_value<T: DeserializeOwned>(store: &dyn CollectionStore, key: &str) -> Option<T> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) if !bytes.is_empty() => bytes,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage read failed, treating as empty");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed stored value, treating as empty");
            None
        }
    }
}

/// Serialize a single value under `key`
pub fn write_value<T: Serialize>(
    store: &dyn CollectionStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let bytes = serde_json::to_vec(value)?;
    store.set(key, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        qty: u32,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: "a".to_string(),
                qty: 1,
            },
            Item {
                id: "b".to_string(),
                qty: 2,
            },
        ]
    }

    #[test]
    fn test_collection_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), 5);
        assert!(!keys.contains(SESSION_KEY));
    }

    #[test]
    fn test_read_absent_key_is_empty() {
        let store = MemoryStore::new();
        let read: Vec<Item> = read_collection(&store, "missing");
        assert!(read.is_empty());
    }

    #[test]
    fn test_write_then_read_keeps_order() {
        let store = MemoryStore::new();
        write_collection(&store, "items", &items()).unwrap();
        let read: Vec<Item> = read_collection(&store, "items");
        assert_eq!(read, items());
    }

    #[test]
    fn test_malformed_value_reads_as_empty() {
        let store = MemoryStore::new();
        store.set("items", b"{not json").unwrap();
        let read: Vec<Item> = read_collection(&store, "items");
        assert!(read.is_empty());

        store.set("items", b"").unwrap();
        let read: Vec<Item> = read_collection(&store, "items");
        assert!(read.is_empty());
    }

    #[test]
    fn test_non_array_value_reads_as_empty() {
        let store = MemoryStore::new();
        store.set("items", br#"{"id":"a","qty":1}"#).unwrap();
        let read: Vec<Item> = read_collection(&store, "items");
        assert!(read.is_empty());
    }

    #[test]
    fn test_read_write_round_trip_is_idempotent() {
        let store = MemoryStore::new();
        write_collection(&store, "items", &items()).unwrap();
        let before = store.get("items").unwrap().unwrap();

        let read: Vec<Item> = read_collection(&store, "items");
        write_collection(&store, "items", &read).unwrap();

        let after = store.get("items").unwrap().unwrap();
        assert_eq!(before, after);
    }
}
