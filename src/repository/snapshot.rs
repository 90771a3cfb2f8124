//! In-memory catalog snapshot

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::catalog::{ContentKind, CourseRecord, EventRecord};

/// Where a kind's current list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Durable,
    Remote,
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Durable => "durable cache",
            Self::Remote => "remote",
            Self::Fallback => "fallback catalog",
        })
    }
}

/// A resolved list and the tier that produced it
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub tier: Tier,
}

pub(crate) type Slot<T> = Mutex<Option<Loaded<T>>>;

/// Lists resolved during this repository's lifetime, one slot per kind.
///
/// A slot stays filled until [`SnapshotCache::invalidate`], however old it is.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    pub(crate) courses: Slot<CourseRecord>,
    pub(crate) events: Slot<EventRecord>,
}

pub(crate) fn lock<T>(slot: &Slot<T>) -> MutexGuard<'_, Option<Loaded<T>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop both kinds
    pub fn invalidate(&self) {
        *lock(&self.courses) = None;
        *lock(&self.events) = None;
    }

    /// Tier that served `kind`, or `None` if it isn't loaded
    pub fn tier(&self, kind: ContentKind) -> Option<Tier> {
        match kind {
            ContentKind::Course => lock(&self.courses).as_ref().map(|l| l.tier),
            ContentKind::Event => lock(&self.events).as_ref().map(|l| l.tier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback;

    #[test]
    fn test_invalidate_empties_both_slots() {
        let snapshot = SnapshotCache::new();
        *lock(&snapshot.courses) = Some(Loaded {
            items: fallback::courses(),
            tier: Tier::Fallback,
        });
        *lock(&snapshot.events) = Some(Loaded {
            items: fallback::events(),
            tier: Tier::Remote,
        });

        assert_eq!(snapshot.tier(ContentKind::Event), Some(Tier::Remote));

        snapshot.invalidate();

        assert!(snapshot.tier(ContentKind::Course).is_none());
        assert!(snapshot.tier(ContentKind::Event).is_none());
    }
}
