//! Hotel Repository

use super::{BaseRepository, Patch, Record, RepoResult, Stamped};
use crate::storage::{Collection, CollectionStore};
use shared::models::{Hotel, HotelCreate, HotelUpdate};
use shared::util::{new_id, now_iso};
use std::sync::Arc;

impl Record for Hotel {
    const COLLECTION: Collection = Collection::Hotels;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Stamped for Hotel {
    fn touch(&mut self, at: String) {
        self.updated_at = Some(at);
    }
}

impl Patch<Hotel> for HotelUpdate {
    fn apply_to(self, hotel: &mut Hotel) {
        if let Some(name) = self.name {
            hotel.name = name;
        }
        if self.address.is_some() {
            hotel.address = self.address;
        }
        if self.capacity.is_some() {
            hotel.capacity = self.capacity;
        }
        if self.description.is_some() {
            hotel.description = self.description;
        }
        if self.url.is_some() {
            hotel.url = self.url;
        }
    }
}

#[derive(Clone)]
pub struct HotelRepository {
    base: BaseRepository<Hotel>,
}

impl HotelRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn list(&self) -> Vec<Hotel> {
        self.base.list()
    }

    pub fn get(&self, id: &str) -> Option<Hotel> {
        self.base.get(id)
    }

    /// The first hotel ever created, used as the default hotel view
    pub fn primary(&self) -> Option<Hotel> {
        self.list().into_iter().next()
    }

    pub fn create(&self, data: HotelCreate) -> RepoResult<Hotel> {
        let hotel = Hotel {
            id: new_id(),
            name: data.name,
            address: data.address,
            capacity: data.capacity,
            description: data.description,
            url: data.url,
            created_at: now_iso(),
            updated_at: None,
        };

        let hotel = self.base.insert(hotel)?;
        tracing::info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    pub fn update(&self, id: &str, data: HotelUpdate) -> RepoResult<Option<Hotel>> {
        self.base.patch(id, data)
    }

    pub fn remove(&self, id: &str) -> RepoResult<bool> {
        self.base.remove(id)
    }

    pub(crate) fn clear(&self) -> RepoResult<bool> {
        self.base.clear()
    }
}
