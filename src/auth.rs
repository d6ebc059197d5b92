//! Local sign-up and login
//!
//! Accounts live in the local store only; there is no remote identity service.
//! Passwords are kept as salted SHA-256 digests, never in clear text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "session";

/// Errors from sign-up and login
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill all fields")]
    MissingFields,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("An account with email '{0}' already exists")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not signed in. Run `skyview login` first")]
    NotSignedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub login_time: DateTime<Utc>,
}

/// A registered account as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credential {
    id: i64,
    name: String,
    email: String,
    password_digest: String,
    created_at: DateTime<Utc>,
}

/// Digest of a password, salted with the normalized email
fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"skyview:");
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers accounts and tracks the current session
#[derive(Debug, Clone)]
pub struct AuthStore {
    store: KeyValueStore,
}

impl AuthStore {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    fn credentials(&self) -> Result<Vec<Credential>, StorageError> {
        Ok(self
            .store
            .read::<Vec<Credential>>(USERS_KEY)?
            .map(|stored| stored.value)
            .unwrap_or_default())
    }

    fn start_session(&self, credential: &Credential) -> Result<User, StorageError> {
        let user = User {
            id: credential.id,
            name: credential.name.clone(),
            email: credential.email.clone(),
            login_time: Utc::now(),
        };
        self.store.write(SESSION_KEY, &user)?;
        Ok(user)
    }

    /// Creates an account and signs it in
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail(email));
        }

        let mut credentials = self.credentials()?;
        if credentials.iter().any(|c| c.email == email) {
            return Err(AuthError::EmailTaken(email));
        }

        let now = Utc::now();
        let credential = Credential {
            id: now.timestamp_millis(),
            name: name.to_string(),
            password_digest: password_digest(&email, password),
            email,
            created_at: now,
        };
        credentials.push(credential.clone());
        self.store.write(USERS_KEY, &credentials)?;
        tracing::debug!(email = %credential.email, "registered account");

        Ok(self.start_session(&credential)?)
    }

    /// Signs in an existing account
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let digest = password_digest(&email, password);
        let credentials = self.credentials()?;
        let credential = credentials
            .iter()
            .find(|c| c.email == email && c.password_digest == digest)
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(self.start_session(credential)?)
    }

    /// Renames the signed-in user, in both the account record and the session
    pub fn update_profile(&self, name: &str) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let mut user = self.current_user()?.ok_or(AuthError::NotSignedIn)?;

        let mut credentials = self.credentials()?;
        let credential = credentials
            .iter_mut()
            .find(|c| c.id == user.id && c.email == user.email)
            .ok_or(AuthError::NotSignedIn)?;
        credential.name = name.to_string();
        self.store.write(USERS_KEY, &credentials)?;

        user.name = name.to_string();
        self.store.write(SESSION_KEY, &user)?;
        tracing::debug!(email = %user.email, "updated profile");
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY)
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Result<Option<User>, StorageError> {
        Ok(self.store.read::<User>(SESSION_KEY)?.map(|stored| stored.value))
    }
}
