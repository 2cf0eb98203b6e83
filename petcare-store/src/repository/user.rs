//! User Repository

use super::{BaseRepository, Patch, Record, RepoError, RepoResult, Stamped};
use crate::auth::password::hash_password;
use crate::storage::{Collection, CollectionStore};
use shared::models::{User, UserCreate, UserUpdate};
use shared::util::{new_id, now_iso};
use std::sync::Arc;

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Stamped for User {
    fn touch(&mut self, at: String) {
        self.updated_at = Some(at);
    }
}

/// Plain profile fields of a [`UserUpdate`]; the password is hashed separately
struct UserFields {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    role: Option<shared::models::Role>,
}

impl Patch<User> for UserFields {
    fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository<User>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// All users in creation order
    pub fn list(&self) -> Vec<User> {
        self.base.list()
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.base.get(id)
    }

    /// Find user by email (case-insensitive)
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.base.find(|u| normalize_email(&u.email) == email)
    }

    /// Create a new user
    pub fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).is_some() {
            return Err(RepoError::EmailTaken(data.email));
        }

        let password_hash = hash_password(&data.password)
            .map_err(|e| RepoError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = User {
            id: new_id(),
            name: data.name,
            email: data.email.trim().to_string(),
            phone: data.phone,
            role: data.role,
            password_hash,
            created_at: now_iso(),
            updated_at: None,
        };

        let user = self.base.insert(user)?;
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Merge `data` over the user; `None` when the id is unknown
    pub fn update(&self, id: &str, data: UserUpdate) -> RepoResult<Option<User>> {
        if let Some(email) = &data.email
            && let Some(other) = self.find_by_email(email)
            && other.id != id
        {
            return Err(RepoError::EmailTaken(email.clone()));
        }

        let password_hash = match &data.password {
            Some(password) => Some(
                hash_password(password)
                    .map_err(|e| RepoError::Internal(format!("Failed to hash password: {}", e)))?,
            ),
            None => None,
        };

        let fields = UserFields {
            name: data.name,
            email: data.email.map(|e| e.trim().to_string()),
            phone: data.phone,
            role: data.role,
        };

        self.base.modify(id, |user| {
            fields.apply_to(user);
            if let Some(hash) = password_hash {
                user.password_hash = hash;
            }
            Ok(())
        })
    }

    /// Delete a user. Pets and reservations referencing it are left alone.
    pub fn remove(&self, id: &str) -> RepoResult<bool> {
        let removed = self.base.remove(id)?;
        if removed {
            tracing::info!(user_id = %id, "User removed");
        }
        Ok(removed)
    }

    pub(crate) fn clear(&self) -> RepoResult<bool> {
        self.base.clear()
    }
}
