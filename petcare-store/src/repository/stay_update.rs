//! Stay Update Repository
//!
//! Append-only journal; entries are never edited.

use super::{BaseRepository, Record, RepoResult};
use crate::storage::{Collection, CollectionStore};
use shared::models::{StayUpdate, StayUpdateCreate};
use shared::util::{new_id, now_iso};
use std::sync::Arc;

impl Record for StayUpdate {
    const COLLECTION: Collection = Collection::StayUpdates;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct StayUpdateRepository {
    base: BaseRepository<StayUpdate>,
}

impl StayUpdateRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn list(&self) -> Vec<StayUpdate> {
        self.base.list()
    }

    /// Journal of one reservation, oldest first
    pub fn list_by_reservation(&self, reservation_id: &str) -> Vec<StayUpdate> {
        self.base.list_where(|u| u.reservation_id == reservation_id)
    }

    pub fn get(&self, id: &str) -> Option<StayUpdate> {
        self.base.get(id)
    }

    pub fn create(&self, data: StayUpdateCreate) -> RepoResult<StayUpdate> {
        let entry = StayUpdate {
            id: new_id(),
            reservation_id: data.reservation_id,
            author_name: data.author_name,
            text: data.text,
            created_at: now_iso(),
        };
        let entry = self.base.insert(entry)?;
        tracing::debug!(
            update_id = %entry.id,
            reservation_id = %entry.reservation_id,
            "Stay update added"
        );
        Ok(entry)
    }

    pub fn remove(&self, id: &str) -> RepoResult<bool> {
        self.base.remove(id)
    }

    pub(crate) fn clear(&self) -> RepoResult<bool> {
        self.base.clear()
    }
}
