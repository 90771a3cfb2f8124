//! Content repository
//!
//! Resolves the course and event lists through four tiers, in order:
//!
//! 1. the in-memory snapshot, if this repository already loaded the kind
//!    (returned even when stale, so each kind is fetched at most once)
//! 2. the durable cache, if its entry is inside the freshness window
//! 3. the remote content source
//! 4. the bundled fallback catalog, when the remote fails or returns nothing
//!
//! Remote results are written to the durable cache with a per-kind timestamp.

mod cache;
mod snapshot;

pub use cache::{CacheEntryStatus, CacheStatus, DurableCache};
pub use snapshot::{Loaded, SnapshotCache, Tier};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::{
    fallback, CatalogItem, CategoryCount, ContentKind, ContentResults, CourseRecord, EventRecord,
};
use crate::error::Result;
use crate::remote::ContentSource;
use crate::store::KeyValueStore;
use snapshot::{lock, Slot};

/// Per-kind plumbing for the generic resolver
trait Resolvable: CatalogItem {
    fn slot(snapshot: &SnapshotCache) -> &Slot<Self>;
    fn fetch(source: &dyn ContentSource) -> Result<Vec<Self>>;
    fn fallback() -> Vec<Self>;
}

impl Resolvable for CourseRecord {
    fn slot(snapshot: &SnapshotCache) -> &Slot<Self> {
        &snapshot.courses
    }
    fn fetch(source: &dyn ContentSource) -> Result<Vec<Self>> {
        source.fetch_courses()
    }
    fn fallback() -> Vec<Self> {
        fallback::courses()
    }
}

impl Resolvable for EventRecord {
    fn slot(snapshot: &SnapshotCache) -> &Slot<Self> {
        &snapshot.events
    }
    fn fetch(source: &dyn ContentSource) -> Result<Vec<Self>> {
        source.fetch_events()
    }
    fn fallback() -> Vec<Self> {
        fallback::events()
    }
}

/// Single source of truth for catalog content
pub struct ContentRepository {
    source: Box<dyn ContentSource>,
    cache: DurableCache,
    snapshot: SnapshotCache,
}

impl ContentRepository {
    /// Create a repository over `store` fetching from `source`
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Box<dyn ContentSource>,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            cache: DurableCache::new(store, ttl),
            snapshot: SnapshotCache::new(),
        }
    }

    fn resolve<T: Resolvable>(&self) -> Vec<T> {
        // Held for the whole resolution so concurrent callers share one fetch
        let mut slot = lock(T::slot(&self.snapshot));

        if let Some(loaded) = slot.as_ref() {
            return loaded.items.clone();
        }

        let loaded = if let Some(items) = self.cache.read_fresh::<T>() {
            Loaded {
                items,
                tier: Tier::Durable,
            }
        } else {
            match T::fetch(self.source.as_ref()) {
                Ok(items) if !items.is_empty() => {
                    if let Err(e) = self.cache.write(&items) {
                        warn!(kind = %T::KIND, error = %e, "could not persist fetched content");
                    }
                    Loaded {
                        items,
                        tier: Tier::Remote,
                    }
                }
                Ok(_) => {
                    warn!(kind = %T::KIND, "remote returned no records, using fallback catalog");
                    Loaded {
                        items: T::fallback(),
                        tier: Tier::Fallback,
                    }
                }
                Err(e) => {
                    warn!(kind = %T::KIND, error = %e, "remote fetch failed, using fallback catalog");
                    Loaded {
                        items: T::fallback(),
                        tier: Tier::Fallback,
                    }
                }
            }
        };

        debug!(kind = %T::KIND, tier = %loaded.tier, count = loaded.items.len(), "resolved");
        let items = loaded.items.clone();
        *slot = Some(loaded);
        items
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists and Lookups
    // ─────────────────────────────────────────────────────────────────────────

    pub fn get_courses(&self) -> Vec<CourseRecord> {
        self.resolve()
    }

    pub fn get_events(&self) -> Vec<EventRecord> {
        self.resolve()
    }

    pub fn get_course_by_id(&self, id: &str) -> Option<CourseRecord> {
        self.get_courses().into_iter().find(|c| c.id == id)
    }

    pub fn get_event_by_id(&self, id: &str) -> Option<EventRecord> {
        self.get_events().into_iter().find(|e| e.id == id)
    }

    /// Both kinds, fully resolved
    pub fn snapshot(&self) -> ContentResults {
        ContentResults {
            courses: self.get_courses(),
            events: self.get_events(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Case-insensitive substring search over title, description, category
    /// and tags of both kinds. An empty query matches everything.
    pub fn search_content(&self, query: &str) -> ContentResults {
        let needle = query.to_lowercase();
        ContentResults {
            courses: matching(self.get_courses(), |c| c.matches_lowercase(&needle)),
            events: matching(self.get_events(), |e| e.matches_lowercase(&needle)),
        }
    }

    /// Exact, case-sensitive category match over both kinds
    pub fn filter_by_category(&self, category: &str) -> ContentResults {
        ContentResults {
            courses: matching(self.get_courses(), |c| c.category == category),
            events: matching(self.get_events(), |e| e.category == category),
        }
    }

    /// Distinct categories in first-seen order, courses before events
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();

        let mut bump = |name: &str, kind: ContentKind| {
            let idx = match counts.iter().position(|c| c.name == name) {
                Some(idx) => idx,
                None => {
                    counts.push(CategoryCount {
                        name: name.to_string(),
                        courses: 0,
                        events: 0,
                    });
                    counts.len() - 1
                }
            };
            match kind {
                ContentKind::Course => counts[idx].courses += 1,
                ContentKind::Event => counts[idx].events += 1,
            }
        };

        for course in self.get_courses() {
            bump(&course.category, ContentKind::Course);
        }
        for event in self.get_events() {
            bump(&event.category, ContentKind::Event);
        }

        counts
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cache Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Forget the in-memory snapshot and delete the durable entries
    pub fn clear_cache(&self) -> Result<()> {
        self.snapshot.invalidate();
        self.cache.clear()
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    /// Tier that served `kind` in this process, if it has been resolved
    pub fn served_from(&self, kind: ContentKind) -> Option<Tier> {
        self.snapshot.tier(kind)
    }
}

fn matching<T>(items: Vec<T>, pred: impl Fn(&T) -> bool) -> Vec<T> {
    items.into_iter().filter(|item| pred(item)).collect()
}
