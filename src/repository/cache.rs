//! Durable catalog cache with a per-kind freshness clock

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::catalog::{CatalogItem, ContentKind};
use crate::error::Result;
use crate::store::{get_json, keys, set_json, KeyValueStore};

/// Storage keys for one kind's items and timestamp
fn keys_for(kind: ContentKind) -> (&'static str, &'static str) {
    match kind {
        ContentKind::Course => (keys::COURSES, keys::COURSES_TIMESTAMP),
        ContentKind::Event => (keys::EVENTS, keys::EVENTS_TIMESTAMP),
    }
}

/// Status of a single cache entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntryStatus {
    pub exists: bool,
    pub age_secs: Option<u64>,
    pub count: Option<usize>,
    pub fresh: bool,
}

/// Durable cache status for both kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub ttl_secs: u64,
    pub courses: CacheEntryStatus,
    pub events: CacheEntryStatus,
}

/// Catalog lists persisted in the key-value store
pub struct DurableCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl DurableCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// When the entry for `kind` was written, if it parses
    fn written_at(&self, kind: ContentKind) -> Result<Option<DateTime<Utc>>> {
        let (_, ts_key) = keys_for(kind);
        let Some(raw) = self.store.get(ts_key)? else {
            return Ok(None);
        };

        Ok(raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis))
    }

    fn age_secs(written_at: DateTime<Utc>) -> u64 {
        let age = Utc::now().signed_duration_since(written_at).num_seconds();
        u64::try_from(age).unwrap_or(0)
    }

    /// Fresh when written inside the window; a future timestamp is stale
    fn is_fresh(&self, written_at: DateTime<Utc>) -> bool {
        let age = Utc::now().signed_duration_since(written_at).num_seconds();
        u64::try_from(age).is_ok_and(|age| age < self.ttl.as_secs())
    }

    /// Items for `T`'s kind if the entry exists and is within the freshness window.
    ///
    /// Storage failures and corrupt entries are logged and read as a miss.
    pub fn read_fresh<T: CatalogItem>(&self) -> Option<Vec<T>> {
        let (items_key, _) = keys_for(T::KIND);

        let written_at = match self.written_at(T::KIND) {
            Ok(Some(at)) => at,
            Ok(None) => return None,
            Err(e) => {
                warn!(kind = %T::KIND, error = %e, "could not read cache timestamp");
                return None;
            }
        };

        if !self.is_fresh(written_at) {
            return None;
        }

        match get_json::<Vec<T>>(self.store.as_ref(), items_key) {
            Ok(items) => items,
            Err(e) => {
                warn!(kind = %T::KIND, error = %e, "discarding unreadable cache entry");
                None
            }
        }
    }

    /// Persist `items` with a fresh timestamp for their kind only
    pub fn write<T: CatalogItem>(&self, items: &[T]) -> Result<()> {
        let (items_key, ts_key) = keys_for(T::KIND);
        set_json(self.store.as_ref(), items_key, items)?;
        self.store
            .set(ts_key, &Utc::now().timestamp_millis().to_string())
    }

    /// Remove both kinds' entries and timestamps
    pub fn clear(&self) -> Result<()> {
        self.store.remove_many(&[
            keys::COURSES,
            keys::COURSES_TIMESTAMP,
            keys::EVENTS,
            keys::EVENTS_TIMESTAMP,
        ])
    }

    /// Inspect the entry for `kind`
    pub fn entry_status(&self, kind: ContentKind) -> CacheEntryStatus {
        let (items_key, _) = keys_for(kind);

        let count = match self.store.get(items_key) {
            Ok(Some(raw)) => Some(
                serde_json::from_str::<Vec<serde_json::Value>>(&raw)
                    .ok()
                    .map(|items| items.len()),
            ),
            Ok(None) => None,
            Err(_) => Some(None),
        };

        let Some(count) = count else {
            return CacheEntryStatus {
                exists: false,
                age_secs: None,
                count: None,
                fresh: false,
            };
        };

        let written_at = self.written_at(kind).ok().flatten();

        CacheEntryStatus {
            exists: true,
            age_secs: written_at.map(Self::age_secs),
            fresh: count.is_some() && written_at.is_some_and(|at| self.is_fresh(at)),
            count,
        }
    }

    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            ttl_secs: self.ttl.as_secs(),
            courses: self.entry_status(ContentKind::Course),
            events: self.entry_status(ContentKind::Event),
        }
    }
}
