//! Password hashing (argon2)

use argon2::password_hash;

/// Minimum accepted length for a new password
pub const MIN_PASSWORD_LEN: usize = 4;

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify password against a stored PHC string.
///
/// A stored value that is not a valid hash never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is malformed");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
