//! User Model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// User role
///
/// Records written before guardians were folded into users carry the role
/// value `tutor`; it reads back as [`Role::Guardian`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(alias = "tutor")]
    Guardian,
    Hotel,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guardian => "guardian",
            Role::Hotel => "hotel",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity (guardian, hotel operator or admin)
///
/// Older records may lack `email` and `createdAt`, store `phone` as a number
/// and keep a clear-text `password`. They still load; the clear-text value
/// lands in `password_hash`, where it never verifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "phone_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// argon2 PHC string
    #[serde(default, alias = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Phone as text, accepting the numeric form
fn phone_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Phone {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Phone>::deserialize(de)?.map(|phone| match phone {
        Phone::Text(text) => text,
        Phone::Number(number) => number.to_string(),
    }))
}

/// Create user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Plain password, hashed before it is stored
    pub password: String,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    /// Plain password, hashed before it is stored
    pub password: Option<String>,
}
