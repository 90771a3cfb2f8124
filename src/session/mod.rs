//! Session store
//!
//! Registered accounts live in one list under a single key; the logged-in
//! user is a copy of their record under another. Logging out only removes
//! that copy.

mod password;

pub use password::{hash_password, verify_password};

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::store::{get_json, keys, set_json, KeyValueStore};

/// Demo account seeded on first run
pub const DEMO_EMAIL: &str = "demo@uom.lk";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_STUDENT_ID: &str = "224090C";

/// Public profile of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
}

/// A user record plus its credential, as stored in the account list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    #[serde(flatten)]
    user: UserRecord,
    password_hash: String,
}

/// Registration form
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub year: String,
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Authentication state backed by the key-value store
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles on the account list
    writer: Mutex<()>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        get_json(self.store.as_ref(), keys::REGISTERED_USERS).map(Option::unwrap_or_default)
    }

    fn set_current(&self, user: &UserRecord) -> Result<()> {
        set_json(self.store.as_ref(), keys::AUTH_USER, user)
    }

    /// The logged-in user; unreadable storage reads as logged out
    pub fn current_user(&self) -> Option<UserRecord> {
        get_json(self.store.as_ref(), keys::AUTH_USER).unwrap_or_else(|e| {
            warn!(error = %e, "could not read current session");
            None
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Log in by case-insensitive email and password
    pub fn login(&self, email: &str, password: &str) -> std::result::Result<UserRecord, AuthError> {
        let accounts = self.accounts().map_err(|e| {
            warn!(error = %e, "login failed");
            AuthError::Failed("Login failed. Please try again.".to_string())
        })?;

        let account = accounts
            .into_iter()
            .find(|a| same_email(&a.user.email, email) && verify_password(password, &a.password_hash))
            .ok_or(AuthError::InvalidCredentials)?;

        self.set_current(&account.user).map_err(|e| {
            warn!(error = %e, "could not persist session");
            AuthError::Failed("Login failed. Please try again.".to_string())
        })?;

        info!(user = %account.user.id, "logged in");
        Ok(account.user)
    }

    /// Create an account and log it in
    pub fn register(&self, form: &Registration) -> std::result::Result<UserRecord, AuthError> {
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let failed = |e: crate::error::UniscoutError| {
            warn!(error = %e, "registration failed");
            AuthError::Failed("Registration failed. Please try again.".to_string())
        };

        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut accounts = self.accounts().map_err(failed)?;

        if accounts.iter().any(|a| same_email(&a.user.email, &form.email)) {
            return Err(AuthError::EmailTaken);
        }
        if accounts.iter().any(|a| a.user.student_id == form.student_id) {
            return Err(AuthError::StudentIdTaken);
        }

        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: form.email.clone(),
            name: form.name.clone(),
            student_id: form.student_id.clone(),
            faculty: form.faculty.clone(),
            year: form.year.clone(),
            created_at: Utc::now(),
        };

        accounts.push(Account {
            user: user.clone(),
            password_hash: hash_password(&form.password)?,
        });
        set_json(self.store.as_ref(), keys::REGISTERED_USERS, &accounts).map_err(failed)?;
        self.set_current(&user).map_err(failed)?;

        info!(user = %user.id, "registered");
        Ok(user)
    }

    /// Forget the current session; the account itself is kept
    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::AUTH_USER)
    }

    /// Replace the stored record with the same id and the current session
    pub fn update_profile(&self, user: &UserRecord) -> std::result::Result<(), AuthError> {
        let failed = |e: crate::error::UniscoutError| {
            warn!(error = %e, "profile update failed");
            AuthError::Failed("Failed to update profile".to_string())
        };

        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut accounts = self.accounts().map_err(failed)?;

        if let Some(account) = accounts.iter_mut().find(|a| a.user.id == user.id) {
            account.user = user.clone();
            set_json(self.store.as_ref(), keys::REGISTERED_USERS, &accounts).map_err(failed)?;
        }

        self.set_current(user).map_err(failed)
    }

    /// Register the demo account unless it already exists. Does not log in.
    ///
    /// Returns whether the account was created.
    pub fn seed_demo_user(&self) -> Result<bool> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut accounts = self.accounts()?;

        if accounts.iter().any(|a| {
            same_email(&a.user.email, DEMO_EMAIL) || a.user.student_id == DEMO_STUDENT_ID
        }) {
            return Ok(false);
        }

        accounts.push(Account {
            user: UserRecord {
                id: Uuid::new_v4().to_string(),
                email: DEMO_EMAIL.to_string(),
                name: "Demo Student".to_string(),
                student_id: DEMO_STUDENT_ID.to_string(),
                faculty: "Faculty of Engineering".to_string(),
                year: "Year 3".to_string(),
                created_at: Utc::now(),
            },
            password_hash: hash_password(DEMO_PASSWORD)?,
        });
        set_json(self.store.as_ref(), keys::REGISTERED_USERS, &accounts)?;

        info!("demo user created");
        Ok(true)
    }
}
