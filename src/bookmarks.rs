//! Bookmark ledger
//!
//! A flat list of saved (id, kind) pairs stored under a single key. Ids are
//! weak references into the catalog and are resolved on every read, so an
//! entry whose course or event has disappeared simply stops showing up.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{CatalogItem, ContentKind, CourseRecord, EventRecord};
use crate::error::{Result, UniscoutError};
use crate::repository::ContentRepository;
use crate::store::{get_json, keys, set_json, KeyValueStore};

/// One bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub saved_at: DateTime<Utc>,
}

impl SavedItem {
    fn is(&self, id: &str, kind: ContentKind) -> bool {
        self.id == id && self.kind == kind
    }
}

/// Owner of all [`SavedItem`]s
pub struct BookmarkLedger {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles on the ledger key
    writer: Mutex<()>,
}

impl BookmarkLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<SavedItem>> {
        get_json(self.store.as_ref(), keys::SAVED_ITEMS).map(Option::unwrap_or_default)
    }

    /// Ledger contents for a mutation. IO failures propagate; a corrupt
    /// ledger is logged and replaced.
    fn load_for_write(&self) -> Result<Vec<SavedItem>> {
        match self.load() {
            Ok(items) => Ok(items),
            Err(UniscoutError::Json(e)) => {
                warn!(error = %e, "saved items are unreadable, starting a new ledger");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<SavedItem>) -> (bool, T)) -> Result<T> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut items = self.load_for_write()?;
        let (changed, out) = f(&mut items);
        if changed {
            set_json(self.store.as_ref(), keys::SAVED_ITEMS, &items)?;
        }
        Ok(out)
    }

    /// Every bookmark in insertion order; unreadable storage reads as empty
    pub fn saved_items(&self) -> Vec<SavedItem> {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read saved items");
            Vec::new()
        })
    }

    pub fn is_saved(&self, id: &str, kind: ContentKind) -> bool {
        self.saved_items().iter().any(|item| item.is(id, kind))
    }

    /// Bookmark `(id, kind)`; saving twice keeps a single entry
    pub fn save(&self, id: &str, kind: ContentKind) -> Result<()> {
        self.mutate(|items| {
            if items.iter().any(|item| item.is(id, kind)) {
                return (false, ());
            }
            items.push(SavedItem {
                id: id.to_string(),
                kind,
                saved_at: Utc::now(),
            });
            (true, ())
        })
    }

    /// Remove every bookmark for `(id, kind)`
    pub fn unsave(&self, id: &str, kind: ContentKind) -> Result<()> {
        self.mutate(|items| {
            let before = items.len();
            items.retain(|item| !item.is(id, kind));
            (items.len() != before, ())
        })
    }

    /// Flip the bookmark and return whether it is now saved
    pub fn toggle(&self, id: &str, kind: ContentKind) -> Result<bool> {
        self.mutate(|items| {
            let before = items.len();
            items.retain(|item| !item.is(id, kind));
            if items.len() != before {
                return (true, false);
            }
            items.push(SavedItem {
                id: id.to_string(),
                kind,
                saved_at: Utc::now(),
            });
            (true, true)
        })
    }

    fn project<T: CatalogItem>(&self, catalog: Vec<T>) -> Vec<T> {
        let saved: Vec<String> = self
            .saved_items()
            .into_iter()
            .filter(|item| item.kind == T::KIND)
            .map(|item| item.id)
            .collect();

        catalog
            .into_iter()
            .filter(|entry| saved.iter().any(|id| id == entry.id()))
            .collect()
    }

    /// Saved courses that still resolve in the repository, in catalog order
    pub fn saved_courses(&self, repo: &ContentRepository) -> Vec<CourseRecord> {
        self.project(repo.get_courses())
    }

    /// Saved events that still resolve in the repository, in catalog order
    pub fn saved_events(&self, repo: &ContentRepository) -> Vec<EventRecord> {
        self.project(repo.get_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback;
    use crate::remote::ContentSource;
    use crate::store::MemoryStore;
    use std::time::Duration;

    struct Offline;

    impl ContentSource for Offline {
        fn fetch_courses(&self) -> Result<Vec<CourseRecord>> {
            Err(UniscoutError::api(500, "offline"))
        }
        fn fetch_events(&self) -> Result<Vec<EventRecord>> {
            Err(UniscoutError::api(500, "offline"))
        }
    }

    fn ledger() -> (Arc<MemoryStore>, BookmarkLedger) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), BookmarkLedger::new(store))
    }

    fn offline_repo(store: Arc<MemoryStore>) -> ContentRepository {
        ContentRepository::new(store, Box::new(Offline), Duration::from_secs(3600))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save/Unsave Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_is_saved_after_save_and_unsave() {
        let (_, ledger) = ledger();

        assert!(!ledger.is_saved("c1", ContentKind::Course));
        ledger.save("c1", ContentKind::Course).unwrap();
        assert!(ledger.is_saved("c1", ContentKind::Course));
        ledger.unsave("c1", ContentKind::Course).unwrap();
        assert!(!ledger.is_saved("c1", ContentKind::Course));
    }

    #[test]
    fn test_save_is_idempotent() {
        let (_, ledger) = ledger();

        ledger.save("c1", ContentKind::Course).unwrap();
        ledger.save("c1", ContentKind::Course).unwrap();

        assert_eq!(ledger.saved_items().len(), 1);
    }

    #[test]
    fn test_same_id_different_kind_are_distinct() {
        let (_, ledger) = ledger();

        ledger.save("x", ContentKind::Course).unwrap();
        ledger.save("x", ContentKind::Event).unwrap();
        ledger.unsave("x", ContentKind::Course).unwrap();

        assert!(!ledger.is_saved("x", ContentKind::Course));
        assert!(ledger.is_saved("x", ContentKind::Event));
    }

    #[test]
    fn test_unsave_absent_is_noop() {
        let (store, ledger) = ledger();

        ledger.unsave("nope", ContentKind::Event).unwrap();

        assert!(store.get(keys::SAVED_ITEMS).unwrap().is_none());
    }

    #[test]
    fn test_unsave_removes_duplicates_written_elsewhere() {
        let (store, ledger) = ledger();
        store
            .set(
                keys::SAVED_ITEMS,
                r#"[{"id":"e1","type":"event","savedAt":"2025-01-01T00:00:00Z"},
                    {"id":"e1","type":"event","savedAt":"2025-01-02T00:00:00Z"}]"#,
            )
            .unwrap();

        ledger.unsave("e1", ContentKind::Event).unwrap();

        assert!(ledger.saved_items().is_empty());
    }

    #[test]
    fn test_toggle_flips_state() {
        let (_, ledger) = ledger();

        assert!(ledger.toggle("e1", ContentKind::Event).unwrap());
        assert!(ledger.is_saved("e1", ContentKind::Event));
        assert!(!ledger.toggle("e1", ContentKind::Event).unwrap());
        assert!(!ledger.is_saved("e1", ContentKind::Event));
    }

    #[test]
    fn test_corrupt_ledger_reads_as_empty_and_is_replaced() {
        let (store, ledger) = ledger();
        store.set(keys::SAVED_ITEMS, "garbage").unwrap();

        assert!(!ledger.is_saved("c1", ContentKind::Course));
        ledger.save("c1", ContentKind::Course).unwrap();
        assert!(ledger.is_saved("c1", ContentKind::Course));
    }

    #[test]
    fn test_ledger_json_shape() {
        let (store, ledger) = ledger();
        ledger.save("c1", ContentKind::Course).unwrap();

        let raw = store.get(keys::SAVED_ITEMS).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json[0]["id"], "c1");
        assert_eq!(json[0]["type"], "course");
        assert!(json[0]["savedAt"].is_string());
    }

    #[test]
    fn test_concurrent_saves_are_not_lost() {
        let (_, ledger) = ledger();
        let ledger = Arc::new(ledger);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    ledger.save(&format!("c{i}"), ContentKind::Course).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.saved_items().len(), 16);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Projection Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_saved_courses_resolves_against_catalog() {
        let (store, ledger) = ledger();
        let repo = offline_repo(store);
        let course_id = fallback::courses()[2].id.clone();

        ledger.save(&course_id, ContentKind::Course).unwrap();
        ledger.save("gone", ContentKind::Course).unwrap();

        let saved = ledger.saved_courses(&repo);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, course_id);
    }

    #[test]
    fn test_saved_events_ignores_course_bookmarks() {
        let (store, ledger) = ledger();
        let repo = offline_repo(store);
        let event_id = fallback::events()[0].id.clone();

        // Same id saved as a course must not project into events
        ledger.save(&event_id, ContentKind::Course).unwrap();
        assert!(ledger.saved_events(&repo).is_empty());

        ledger.save(&event_id, ContentKind::Event).unwrap();
        assert_eq!(ledger.saved_events(&repo).len(), 1);
    }
}
