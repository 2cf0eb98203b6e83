//! Authentication
//!
//! Email + password login against the user collection, a session marker in
//! the store and the route gate a UI applies on every navigation.

pub mod gate;
pub mod password;
pub mod session;

pub use gate::{GateDecision, route_gate};
pub use password::{hash_password, verify_password};
pub use session::Session;

use crate::repository::UserRepository;
use crate::storage::{CollectionStore, SESSION_KEY, read_value, write_value};
use crate::utils::validation::{
    FieldErrors, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_password, validate_required_text,
};
use password::MIN_PASSWORD_LEN;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Role, User, UserCreate};
use shared::util::now_iso;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CollectionStore>,
    users: UserRepository,
}

impl AuthService {
    pub fn new(store: Arc<dyn CollectionStore>, users: UserRepository) -> Self {
        Self { store, users }
    }

    /// Check credentials and write the session marker.
    ///
    /// Unknown email and wrong password give the same error.
    pub fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let user = self
            .users
            .find_by_email(email)
            .filter(|user| verify_password(password, &user.password_hash));

        let Some(user) = user else {
            tracing::warn!(email = %email.trim(), "Login failed");
            return Err(AppError::invalid_credentials());
        };

        let session = Session::for_user(&user, now_iso());
        write_value(self.store.as_ref(), SESSION_KEY, &session)
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(session)
    }

    /// Drop the session marker; a no-op when nobody is logged in
    pub fn logout(&self) -> AppResult<()> {
        let existed = self
            .store
            .remove(SESSION_KEY)
            .map_err(|e| AppError::database(e.to_string()))?;
        if existed {
            tracing::info!("User logged out");
        }
        Ok(())
    }

    pub fn current_session(&self) -> Option<Session> {
        read_value(self.store.as_ref(), SESSION_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    /// Session user, or `NotAuthenticated`
    pub fn require_session(&self) -> AppResult<Session> {
        self.current_session()
            .ok_or_else(AppError::not_authenticated)
    }

    /// Gate `path` against the current session
    pub fn gate(&self, path: &str) -> GateDecision {
        route_gate(path, self.is_authenticated())
    }

    /// Validated signup
    pub fn register(&self, data: UserCreate) -> AppResult<User> {
        let mut errors = FieldErrors::new();
        errors.check("name", validate_required_text(&data.name, "name", MAX_NAME_LEN));
        errors.check("email", validate_email(&data.email));
        errors.check("phone", validate_optional_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN));
        if let Err(message) = validate_password(&data.password, MIN_PASSWORD_LEN) {
            // A short password on an otherwise valid form gets its own code
            if errors.is_empty() && data.password.len() < MIN_PASSWORD_LEN {
                return Err(AppError::with_message(ErrorCode::PasswordTooShort, message.clone())
                    .with_detail("password", message));
            }
            errors.add("password", message);
        }
        errors.into_result()?;

        let data = UserCreate {
            name: data.name.trim().to_string(),
            ..data
        };
        Ok(self.users.create(data)?)
    }

    /// Signup with the guardian role, whatever the payload says
    pub fn register_guardian(&self, data: UserCreate) -> AppResult<User> {
        self.register(UserCreate {
            role: Role::Guardian,
            ..data
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> AuthService {
        let store: Arc<dyn CollectionStore> = Arc::new(MemoryStore::new());
        AuthService::new(store.clone(), UserRepository::new(store))
    }

    fn signup() -> UserCreate {
        UserCreate {
            name: "Ana Martins".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            role: Role::Guardian,
            password: "petcare".to_string(),
        }
    }

    #[test]
    fn test_login_logout() {
        let auth = service();
        let user = auth.register(signup()).unwrap();
        assert!(!auth.is_authenticated());

        let session = auth.login("ana@example.com", "petcare").unwrap();
        assert_eq!(session.user_id, user.id);
        assert!(auth.is_authenticated());
        assert_eq!(auth.current_session(), Some(session));
        assert_eq!(auth.gate("/login"), GateDecision::RedirectHome);

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.gate("/"), GateDecision::RedirectToLogin);
        auth.logout().unwrap();
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let auth = service();
        auth.register(signup()).unwrap();

        let err = auth.login("ana@example.com", "wrong").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        let err = auth.login("nobody@example.com", "petcare").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_require_session() {
        let auth = service();
        let err = auth.require_session().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_register_validation() {
        let auth = service();
        let err = auth
            .register(UserCreate {
                name: " ".to_string(),
                email: "bad".to_string(),
                ..signup()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.field_error("name").is_some());
        assert!(err.field_error("email").is_some());

        let err = auth
            .register(UserCreate {
                password: "abc".to_string(),
                ..signup()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);
    }

    #[test]
    fn test_register_duplicate_email() {
        let auth = service();
        auth.register(signup()).unwrap();
        let err = auth.register(signup()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserEmailExists);
    }

    #[test]
    fn test_register_guardian_forces_role() {
        let auth = service();
        let user = auth
            .register_guardian(UserCreate {
                role: Role::Admin,
                ..signup()
            })
            .unwrap();
        assert_eq!(user.role, Role::Guardian);
    }

    #[test]
    fn test_corrupt_session_reads_as_logged_out() {
        let auth = service();
        auth.store.set(SESSION_KEY, b"true").unwrap();
        assert!(!auth.is_authenticated());
    }
}
