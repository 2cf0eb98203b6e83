//! Session marker

use serde::{Deserialize, Serialize};
use shared::models::{Role, User};

/// Logged-in user, persisted under [`crate::storage::SESSION_KEY`]
///
/// Holds no credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub logged_in_at: String,
}

impl Session {
    pub fn for_user(user: &User, at: String) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            logged_in_at: at,
        }
    }
}
