//! Pet Repository

use super::{BaseRepository, Patch, Record, RepoResult, Stamped};
use crate::storage::{Collection, CollectionStore};
use shared::models::{Pet, PetCreate, PetUpdate};
use shared::util::{new_id, now_iso};
use std::sync::Arc;

impl Record for Pet {
    const COLLECTION: Collection = Collection::Pets;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Stamped for Pet {
    fn touch(&mut self, at: String) {
        self.updated_at = Some(at);
    }
}

impl Patch<Pet> for PetUpdate {
    fn apply_to(self, pet: &mut Pet) {
        if let Some(user_id) = self.user_id {
            pet.user_id = user_id;
        }
        if let Some(name) = self.name {
            pet.name = name;
        }
        if let Some(species) = self.species {
            pet.species = species;
        }
        if self.age.is_some() {
            pet.age = self.age;
        }
        if self.obs.is_some() {
            pet.obs = self.obs;
        }
        if self.url.is_some() {
            pet.url = self.url;
        }
    }
}

#[derive(Clone)]
pub struct PetRepository {
    base: BaseRepository<Pet>,
}

impl PetRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn list(&self) -> Vec<Pet> {
        self.base.list()
    }

    /// Pets owned by `user_id`
    pub fn list_by_user(&self, user_id: &str) -> Vec<Pet> {
        self.base.list_where(|p| p.user_id == user_id)
    }

    pub fn get(&self, id: &str) -> Option<Pet> {
        self.base.get(id)
    }

    /// Create a new pet. The owner reference is stored as given.
    pub fn create(&self, data: PetCreate) -> RepoResult<Pet> {
        let pet = Pet {
            id: new_id(),
            user_id: data.user_id,
            name: data.name,
            species: data.species,
            age: data.age,
            obs: data.obs,
            url: data.url,
            created_at: now_iso(),
            updated_at: None,
        };

        let pet = self.base.insert(pet)?;
        tracing::info!(pet_id = %pet.id, user_id = %pet.user_id, "Pet created");
        Ok(pet)
    }

    pub fn update(&self, id: &str, data: PetUpdate) -> RepoResult<Option<Pet>> {
        self.base.patch(id, data)
    }

    pub fn remove(&self, id: &str) -> RepoResult<bool> {
        self.base.remove(id)
    }

    pub(crate) fn clear(&self) -> RepoResult<bool> {
        self.base.clear()
    }
}
