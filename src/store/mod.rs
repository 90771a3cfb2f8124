//! Key-value storage
//!
//! Durable string-keyed storage of string values. Every persisted piece of
//! state (catalog cache, bookmarks, users, session) is a JSON blob under one
//! of the fixed keys below.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Fixed storage keys
pub mod keys {
    pub const COURSES: &str = "cache.courses";
    pub const COURSES_TIMESTAMP: &str = "cache.courses.timestamp";
    pub const EVENTS: &str = "cache.events";
    pub const EVENTS_TIMESTAMP: &str = "cache.events.timestamp";
    pub const SAVED_ITEMS: &str = "saved_items";
    pub const REGISTERED_USERS: &str = "registered_users";
    pub const AUTH_USER: &str = "auth_user";
}

/// String-keyed storage of string values
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Delete several keys
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Read and decode a JSON value stored under `key`
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn set_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
