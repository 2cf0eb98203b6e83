//! Pet Model

use serde::{Deserialize, Serialize};

/// Pet entity, owned by a guardian user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    /// Owning user reference (not checked on write); older records call it
    /// `tutorId`
    #[serde(alias = "tutorId")]
    pub user_id: String,
    pub name: String,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs: Option<String>,
    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create pet payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetCreate {
    pub user_id: String,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub obs: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Update pet payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub age: Option<u32>,
    pub obs: Option<String>,
    pub url: Option<String>,
}
