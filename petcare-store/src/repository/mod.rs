//! Repository Module
//!
//! Typed CRUD over one collection each. Every operation is a full
//! read-modify-write of its collection through the injected
//! [`CollectionStore`]; last writer wins.
//!
//! Lookups by an unknown id are values (`None` / `false`), never errors.
//! Errors are reserved for failed writes and rejected input.

pub mod hotel;
pub mod pet;
pub mod reservation;
pub mod stay_update;
pub mod user;

// Re-exports
pub use hotel::HotelRepository;
pub use pet::PetRepository;
pub use reservation::ReservationRepository;
pub use stay_update::StayUpdateRepository;
pub use user::UserRepository;

use crate::storage::{Collection, CollectionStore, StorageError, read_collection, write_collection};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use shared::models::ReservationStatus;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Status change {from} -> {to} is not allowed")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::EmailTaken(email) => {
                AppError::new(ErrorCode::UserEmailExists).with_detail("email", email)
            }
            RepoError::Storage(e) => AppError::database(e.to_string()),
            RepoError::InvalidTransition { from, to } => {
                AppError::new(ErrorCode::ReservationInvalidTransition)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            RepoError::Internal(msg) => AppError::internal(msg),
        }
    }
}

/// A record persisted in one collection
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// A record that can be patched and carries `updatedAt`
pub trait Stamped: Record {
    fn touch(&mut self, at: String);
}

/// Partial update merged over an existing record
pub trait Patch<E> {
    fn apply_to(self, record: &mut E);
}

/// Collection-level CRUD shared by every typed repository
pub struct BaseRepository<E> {
    store: Arc<dyn CollectionStore>,
    _record: PhantomData<fn() -> E>,
}

impl<E> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<E: Record> BaseRepository<E> {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<dyn CollectionStore> {
        &self.store
    }

    fn key(&self) -> &'static str {
        E::COLLECTION.key()
    }

    fn save(&self, records: &[E]) -> RepoResult<()> {
        write_collection(self.store.as_ref(), self.key(), records)?;
        Ok(())
    }

    /// All records in stored (append) order
    pub fn list(&self) -> Vec<E> {
        read_collection(self.store.as_ref(), self.key())
    }

    /// Records matching `pred`, in stored order
    pub fn list_where(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.list().into_iter().filter(|r| pred(r)).collect()
    }

    /// First record matching `pred`
    pub fn find(&self, pred: impl Fn(&E) -> bool) -> Option<E> {
        self.list().into_iter().find(|r| pred(r))
    }

    /// Record with the given id
    pub fn get(&self, id: &str) -> Option<E> {
        self.find(|r| r.id() == id)
    }

    /// Append a fully built record
    pub fn insert(&self, record: E) -> RepoResult<E> {
        let mut records = self.list();
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    /// Delete by id; `false` when no record has that id
    pub fn remove(&self, id: &str) -> RepoResult<bool> {
        let records = self.list();
        let before = records.len();
        let next: Vec<E> = records.into_iter().filter(|r| r.id() != id).collect();
        if next.len() == before {
            return Ok(false);
        }
        self.save(&next)?;
        Ok(true)
    }

    /// Drop the whole collection
    pub fn clear(&self) -> RepoResult<bool> {
        Ok(self.store.remove(self.key())?)
    }
}

impl<E: Stamped> BaseRepository<E> {
    /// Apply `change` to the record with `id`, stamp `updatedAt` and persist.
    ///
    /// Returns `Ok(None)` when no record has that id. Nothing is written when
    /// `change` fails.
    pub fn modify(
        &self,
        id: &str,
        change: impl FnOnce(&mut E) -> RepoResult<()>,
    ) -> RepoResult<Option<E>> {
        let mut records = self.list();
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        change(record)?;
        record.touch(shared::util::now_iso());
        let updated = record.clone();

        self.save(&records)?;
        Ok(Some(updated))
    }

    /// Merge `patch` over the record with `id`
    pub fn patch(&self, id: &str, patch: impl Patch<E>) -> RepoResult<Option<E>> {
        self.modify(id, |record| {
            patch.apply_to(record);
            Ok(())
        })
    }
}
