//! # Session State
//!
//! Mock authentication. Accounts live in memory for the life of the process;
//! nothing leaves the machine.
//!
//! ```text
//! register(form) ──► validate ──► sleep(auth delay) ──► hash ──► account + signed in
//! login(email, pw) ─────────────► sleep(auth delay) ──► verify ─► signed in
//! logout() ─────────────────────────────────────────────────────► signed out
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use bite_core::validation::validate_registration;
use bite_core::{User, ValidationError};

/// Authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    /// Deliberately does not say which of email or password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please sign in first")]
    NotAuthenticated,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Registration form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

struct Account {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Sessions {
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
    current: Option<User>,
}

/// Accounts plus the signed-in user.
pub struct SessionState {
    inner: Mutex<Sessions>,
    delay: Duration,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("current", &self.current_user())
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl SessionState {
    /// `delay` stands in for the round trip to an auth server.
    pub fn new(delay: Duration) -> Self {
        SessionState {
            inner: Mutex::new(Sessions::default()),
            delay,
        }
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, form: RegisterForm) -> Result<User, AuthError> {
        validate_registration(&form.name, &form.email, &form.password, &form.confirm_password)?;

        let key = normalize_email(&form.email);
        if self.lock().accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken(form.email.trim().to_string()));
        }

        tokio::time::sleep(self.delay).await;

        let password_hash = hash_password(&form.password)?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: form.email.trim().to_string(),
            name: form.name.trim().to_string(),
            phone: None,
        };

        let mut sessions = self.lock();
        // Re-check: another registration may have landed during the delay.
        if sessions.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken(user.email));
        }
        sessions.accounts.insert(
            key,
            Account {
                user: user.clone(),
                password_hash,
            },
        );
        sessions.current = Some(user.clone());

        info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// Signs in an existing account.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.delay).await;

        let mut sessions = self.lock();
        let account = sessions
            .accounts
            .get(&normalize_email(email))
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash) {
            debug!("Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.user.clone();
        sessions.current = Some(user.clone());

        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Signs out. Returns who was signed in, if anyone.
    pub fn logout(&self) -> Option<User> {
        let user = self.lock().current.take();
        if let Some(user) = &user {
            info!(user_id = %user.id, "Signed out");
        }
        user
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock().current.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().current.is_some()
    }

    /// The signed-in user, or [`AuthError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.current_user().ok_or(AuthError::NotAuthenticated)
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// PHC-format argon2 hash. The salt comes from a v4 UUID's random bytes.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
